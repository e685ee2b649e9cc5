pub mod capture {
    pub mod domain {
        pub mod frame_source;
    }
    pub mod infrastructure;
}

pub mod detection {
    pub mod domain {
        pub mod face_detector;
        pub mod landmark_detector;
        pub mod landmark_layout;
    }
    pub mod infrastructure;
}

pub mod display {
    pub mod domain {
        pub mod display_surface;
    }
    pub mod infrastructure;
}

pub mod pipeline {
    pub mod landmark_overlay_use_case;
    pub mod pipeline_logger;
}

pub mod rendering;

pub mod shared {
    pub mod color;
    pub mod constants;
    pub mod face_box;
    pub mod frame;
    pub mod landmark_set;
}
