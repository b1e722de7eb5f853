use campus_config::jwt::DEFAULT_SESSION_COOKIE;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use campus_auth::Role;
use campus_models::activities::{Activity, ActivityDto};
use campus_models::auth::{LoginRequest, LoginResponse};
use campus_models::classes::{ClassDetail, ClassDto, ClassStudent, TopClass};
use campus_models::courses::{ClassAverage, CourseAverages, CourseClass, CourseDto, CourseWithClasses};
use campus_models::enrolments::{
    ActiveEnrolment, ClassEnrolment, CreateEnrolmentDto, Enrolment, EnrolmentCreated,
    EnrolmentStatus, StudentEnrolment, UpdateEnrolmentDto,
};
use campus_models::grades::{CreateGradeDto, GradeView, UpdateGradeDto};
use campus_models::materials::{CreateMaterialDto, MaterialView};
use campus_models::me::{MeEnrolment, Profile, UpdateMeDto};
use campus_models::submissions::{CreateSubmissionDto, SubmissionView};
use campus_models::users::{
    CreateUserDto, ProfileInfo, UpdateUserDto, UserCreatedResponse, UserDetail, UserListItem,
};
use campus_models::{
    CreatedResponse, HistoryEntry, MessageResponse, NamedRef, PersonSummary, Standing,
};

use crate::realtime::ClassFullEvent;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::login,
        crate::modules::auth::controller::logout,
        crate::modules::users::controller::create_user,
        crate::modules::users::controller::get_users,
        crate::modules::users::controller::get_user,
        crate::modules::users::controller::update_user,
        crate::modules::users::controller::delete_user,
        crate::modules::courses::controller::create_course,
        crate::modules::courses::controller::get_courses,
        crate::modules::courses::controller::get_course,
        crate::modules::courses::controller::update_course,
        crate::modules::courses::controller::delete_course,
        crate::modules::courses::controller::get_course_averages,
        crate::modules::classes::controller::create_class,
        crate::modules::classes::controller::get_classes,
        crate::modules::classes::controller::get_top_classes,
        crate::modules::classes::controller::get_class,
        crate::modules::classes::controller::update_class,
        crate::modules::classes::controller::delete_class,
        crate::modules::enrolments::controller::create_enrolment,
        crate::modules::enrolments::controller::get_active_enrolments,
        crate::modules::enrolments::controller::get_class_enrolments,
        crate::modules::enrolments::controller::get_student_enrolments,
        crate::modules::enrolments::controller::update_student_enrolment,
        crate::modules::enrolments::controller::delete_student_enrolment,
        crate::modules::activities::controller::create_activity,
        crate::modules::activities::controller::get_activities,
        crate::modules::activities::controller::get_activity,
        crate::modules::activities::controller::update_activity,
        crate::modules::grades::controller::create_grade,
        crate::modules::grades::controller::get_grades,
        crate::modules::grades::controller::get_student_grades,
        crate::modules::grades::controller::update_grade,
        crate::modules::materials::controller::create_material,
        crate::modules::materials::controller::get_materials,
        crate::modules::materials::controller::get_material,
        crate::modules::materials::controller::get_class_materials,
        crate::modules::submissions::controller::create_submission,
        crate::modules::submissions::controller::get_submissions,
        crate::modules::history::controller::get_my_history,
        crate::modules::history::controller::get_student_history,
        crate::modules::me::controller::get_me,
        crate::modules::me::controller::update_me,
        crate::realtime::ws::notifications_ws,
    ),
    components(
        schemas(
            Role,
            LoginRequest,
            LoginResponse,
            MessageResponse,
            CreatedResponse,
            PersonSummary,
            NamedRef,
            ProfileInfo,
            CreateUserDto,
            UpdateUserDto,
            UserCreatedResponse,
            UserListItem,
            UserDetail,
            CourseDto,
            CourseClass,
            CourseWithClasses,
            ClassAverage,
            CourseAverages,
            ClassDto,
            ClassStudent,
            ClassDetail,
            TopClass,
            Standing,
            HistoryEntry,
            Enrolment,
            EnrolmentStatus,
            CreateEnrolmentDto,
            EnrolmentCreated,
            UpdateEnrolmentDto,
            ActiveEnrolment,
            ClassEnrolment,
            StudentEnrolment,
            Activity,
            ActivityDto,
            CreateGradeDto,
            UpdateGradeDto,
            GradeView,
            CreateMaterialDto,
            MaterialView,
            CreateSubmissionDto,
            SubmissionView,
            MeEnrolment,
            Profile,
            UpdateMeDto,
            ClassFullEvent,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Session login and logout"),
        (name = "Users", description = "User management (admin)"),
        (name = "Courses", description = "Course management (admin)"),
        (name = "Classes", description = "Class management (admin)"),
        (name = "Enrolments", description = "Enrolment workflow"),
        (name = "Activities", description = "Class activities"),
        (name = "Grades", description = "Grading"),
        (name = "Materials", description = "Class materials"),
        (name = "Submissions", description = "Activity submissions"),
        (name = "History", description = "Grade history (student)"),
        (name = "Me", description = "Own profile"),
        (name = "Notifications", description = "Real-time events for teachers")
    ),
    info(
        title = "Campus API",
        version = "0.1.0",
        description = "Courses, classes, enrolments and grading over Axum and PostgreSQL, with cookie-based sessions.",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "session_cookie",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(DEFAULT_SESSION_COOKIE))),
            )
        }
    }
}
