//! iBUG 68-point layout split into named feature groups.
//!
//! Lips close their contour through the inner mouth points, so both lip
//! groups repeat some indices of the other.

use crate::shared::landmark_set::{LandmarkSet, Point};

pub const NUM_POINTS: usize = 68;

const CHIN: &[usize] = &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16];
const LEFT_EYEBROW: &[usize] = &[17, 18, 19, 20, 21];
const RIGHT_EYEBROW: &[usize] = &[22, 23, 24, 25, 26];
const NOSE_BRIDGE: &[usize] = &[27, 28, 29, 30];
const NOSE_TIP: &[usize] = &[31, 32, 33, 34, 35];
const LEFT_EYE: &[usize] = &[36, 37, 38, 39, 40, 41];
const RIGHT_EYE: &[usize] = &[42, 43, 44, 45, 46, 47];
const TOP_LIP: &[usize] = &[48, 49, 50, 51, 52, 53, 54, 64, 63, 62, 61, 60];
const BOTTOM_LIP: &[usize] = &[54, 55, 56, 57, 58, 59, 48, 60, 67, 66, 65, 64];

pub const GROUPS: [(&str, &[usize]); 9] = [
    ("chin", CHIN),
    ("left_eyebrow", LEFT_EYEBROW),
    ("right_eyebrow", RIGHT_EYEBROW),
    ("nose_bridge", NOSE_BRIDGE),
    ("nose_tip", NOSE_TIP),
    ("left_eye", LEFT_EYE),
    ("right_eye", RIGHT_EYE),
    ("top_lip", TOP_LIP),
    ("bottom_lip", BOTTOM_LIP),
];

/// Splits 68 ordered points into named groups.
pub fn group_points(points: &[Point; NUM_POINTS]) -> LandmarkSet {
    let mut set = LandmarkSet::new();
    for (name, indices) in GROUPS {
        set.insert(name, indices.iter().map(|&i| points[i]).collect());
    }
    set
}
