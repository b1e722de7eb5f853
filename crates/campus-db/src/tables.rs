//! Per-table configuration for [`TableAccessor`](crate::TableAccessor).
//!
//! `fields` are the writable columns; `searchable` additionally lists the
//! columns that may appear in a `WHERE` clause.

use crate::accessor::TableSpec;

pub const USERS: TableSpec = TableSpec {
    name: "users",
    fields: &["name", "email", "password"],
    searchable: &["id", "name", "email"],
};

pub const ASSOCIATED: TableSpec = TableSpec {
    name: "associated",
    fields: &["id_user", "id_profile"],
    searchable: &["id_user", "id_profile"],
};

pub const COURSES: TableSpec = TableSpec {
    name: "courses",
    fields: &["name", "description", "max_students"],
    searchable: &["id", "name", "description", "max_students"],
};

pub const CLASSES: TableSpec = TableSpec {
    name: "classes",
    fields: &[
        "id_course",
        "id_teacher",
        "starts_on",
        "ends_on",
        "period",
        "name",
        "max_students",
        "archived",
    ],
    searchable: &[
        "id",
        "id_course",
        "id_teacher",
        "starts_on",
        "ends_on",
        "period",
        "name",
        "max_students",
        "archived",
    ],
};

pub const ENROLMENT: TableSpec = TableSpec {
    name: "enrolment",
    fields: &["id_student", "id_class", "enrolled_at", "active", "status"],
    searchable: &["id", "id_student", "id_class", "active", "status"],
};

pub const ACTIVITIES: TableSpec = TableSpec {
    name: "activities",
    fields: &[
        "id_class",
        "title",
        "description",
        "type",
        "max_grade",
        "due_date",
    ],
    searchable: &["id", "id_class", "title", "type", "due_date"],
};

pub const GRADES: TableSpec = TableSpec {
    name: "grades",
    fields: &["id_student", "id_activity", "grade"],
    searchable: &["id", "id_student", "id_activity"],
};

pub const MATERIALS: TableSpec = TableSpec {
    name: "materials",
    fields: &["id_class", "title", "description"],
    searchable: &["id", "id_class", "title"],
};

pub const SUBMISSIONS: TableSpec = TableSpec {
    name: "submissions",
    fields: &["id_student", "id_activity", "content"],
    searchable: &["id", "id_student", "id_activity"],
};
