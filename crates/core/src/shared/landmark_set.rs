use std::collections::BTreeMap;

/// A pixel position.
pub type Point = (i32, i32);

/// Named landmark groups of one face.
///
/// Groups are kept sorted by name; points inside a group keep their order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LandmarkSet {
    groups: BTreeMap<String, Vec<Point>>,
}

impl LandmarkSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a group, replacing any previous group of the same name.
    pub fn insert(&mut self, feature: impl Into<String>, points: Vec<Point>) {
        self.groups.insert(feature.into(), points);
    }

    pub fn with_group(mut self, feature: impl Into<String>, points: Vec<Point>) -> Self {
        self.insert(feature, points);
        self
    }

    pub fn get(&self, feature: &str) -> Option<&[Point]> {
        self.groups.get(feature).map(|v| v.as_slice())
    }

    pub fn groups(&self) -> impl Iterator<Item = (&str, &[Point])> {
        self.groups.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_points_keep_order() {
        let set = LandmarkSet::new().with_group("chin", vec![(3, 3), (1, 1), (2, 2)]);
        assert_eq!(set.get("chin").unwrap(), &[(3, 3), (1, 1), (2, 2)]);
    }

    #[test]
    fn test_insert_replaces_group() {
        let mut set = LandmarkSet::new();
        set.insert("nose_tip", vec![(1, 1)]);
        set.insert("nose_tip", vec![(2, 2), (3, 3)]);
        let groups: Vec<_> = set.groups().collect();
        assert_eq!(groups, vec![("nose_tip", &[(2, 2), (3, 3)][..])]);
    }

    #[test]
    fn test_groups_iterate_sorted_by_name() {
        let set = LandmarkSet::new()
            .with_group("top_lip", vec![])
            .with_group("chin", vec![(0, 0)]);
        let names: Vec<_> = set.groups().map(|(n, _)| n).collect();
        assert_eq!(names, ["chin", "top_lip"]);
    }

    #[test]
    fn test_missing_group() {
        assert!(LandmarkSet::new().get("left_eye").is_none());
        assert!(LandmarkSet::new().is_empty());
    }
}
