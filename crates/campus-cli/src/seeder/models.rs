use campus_auth::Role;

pub struct UserSeed {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

pub struct CourseSeed {
    pub name: String,
    pub description: String,
    pub max_students: i32,
}

/// How much data [`super::seed_all`] generates.
#[derive(Debug, Clone)]
pub struct SeedConfig {
    pub admins: usize,
    pub teachers: usize,
    pub students: usize,
    pub courses: usize,
    /// Capped by the number of teachers, since a teacher runs at most one
    /// class per course.
    pub classes_per_course: usize,
    pub students_per_class: usize,
    pub max_students: i32,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            admins: 1,
            teachers: 6,
            students: 120,
            courses: 5,
            classes_per_course: 2,
            students_per_class: 20,
            max_students: 30,
        }
    }
}

impl SeedConfig {
    pub fn with_users(mut self, admins: usize, teachers: usize, students: usize) -> Self {
        self.admins = admins;
        self.teachers = teachers;
        self.students = students;
        self
    }

    pub fn with_courses(mut self, courses: usize) -> Self {
        self.courses = courses;
        self
    }

    pub fn with_classes(mut self, classes_per_course: usize, students_per_class: usize) -> Self {
        self.classes_per_course = classes_per_course;
        self.students_per_class = students_per_class;
        self
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub users: usize,
    pub courses: usize,
    pub classes: usize,
    pub enrolments: usize,
}
