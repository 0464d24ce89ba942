//! # Aula Models
//!
//! Records and form DTOs mirrored from the school-management API.
//!
//! The client does not own the lifecycle of any of these records; it only
//! caches and displays them. Every list record tolerates the looseness of
//! the API (`_id` vs `id`, numeric strings, populated references), and every
//! form checks its required fields with `validator` before a request is made.
//!
//! # Modules
//!
//! - [`ids`]: Typed id newtypes
//! - [`auth`]: Login request / response
//! - [`students`], [`teachers`], [`parents`], [`courses`]: People and courses
//! - [`grades`], [`attendance`], [`justifications`]: Academic records
//! - [`events`], [`messages`]: Calendar and messaging
//! - [`gps`]: Transport tracking
//! - [`reports`], [`settings`]: Reports and school settings

pub mod attendance;
pub mod auth;
pub mod courses;
pub mod events;
pub mod gps;
pub mod grades;
pub mod ids;
pub mod justifications;
pub mod messages;
pub mod parents;
pub mod reports;
pub mod settings;
pub mod students;
pub mod teachers;

// Re-export commonly used types at crate root for convenience
pub use attendance::{
    AttendanceEntry, AttendanceForm, AttendanceRecord, AttendanceStats, AttendanceStatus,
    BulkAttendanceRequest,
};
pub use auth::{LoginRequest, LoginResponse};
pub use courses::{Course, CourseForm, EnrollStudentsRequest};
pub use events::{Event, EventForm, MonthRange};
pub use gps::{Device, Location};
pub use grades::{CourseAverage, Grade, GradeForm, GradeStats};
pub use ids::{
    AttendanceId, CourseId, DeviceId, EventId, GradeId, JustificationId, MessageId, ParentId,
    ReportId, StudentId, TeacherId,
};
pub use justifications::{
    Justification, JustificationForm, JustificationStats, JustificationStatus, ReviewRequest,
};
pub use messages::{Message, MessageForm, UnreadCount};
pub use parents::{LinkStudentRequest, Parent, ParentForm};
pub use reports::{GenerateReportRequest, Report, ReportKind};
pub use settings::{ChangePasswordForm, ProfileForm, SchoolSettings};
pub use students::{Student, StudentForm, StudentStats};
pub use teachers::{Teacher, TeacherForm, TeacherStats};
