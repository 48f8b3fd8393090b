pub mod activity;
pub mod course;
pub mod graduation;
pub mod user;

pub use activity::{Activity, ActivityRequest};
pub use course::{
    CourseRecord, Lecture, LectureFilter, LectureSource, RegisterCourseRequest, UpdateCourseRequest,
};
pub use graduation::{CountedCourse, GraduationCheckItem, GraduationSimple, GraduationStatus, Track};
pub use user::{
    LoginRequest, LoginResponse, ProfileEdit, SessionProbe, SignupRequest, UserProfile,
};
