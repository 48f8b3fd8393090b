pub const AUTH_LOGIN: &str = "/api/auth/login";
pub const AUTH_SIGNUP: &str = "/api/auth/signup";
pub const AUTH_MYPAGE: &str = "/api/auth/mypage";
pub const AUTH_MYPAGE_UPDATE: &str = "/api/auth/mypage/update";

pub const COURSE: &str = "/api/course";
pub const COURSE_HISTORY: &str = "/api/course/history";
pub const COURSE_REGISTER: &str = "/api/course/register";
pub const COURSE_UPDATE: &str = "/api/course/update";

pub const LECTURE_LIST: &str = "/api/lecture/list";
pub const LECTURE_STANDARD: &str = "/api/lecture/standard";

pub const GRADUATION_SIMPLE: &str = "/api/graduation/simple";
pub const GRADUATION_CHECK: &str = "/api/graduation/check";
pub const GRADUATION_MY_STATUS: &str = "/api/graduation/my-status";

pub const ACTIVITY: &str = "/api/activity";
