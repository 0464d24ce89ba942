//! Strongly-typed ID newtypes for domain entities.
//!
//! The API hands out opaque ids (ObjectId strings on most routes, integers
//! on a few). Each entity gets its own newtype so a `CourseId` can never be
//! passed where a `StudentId` is expected.
//!
//! # Example
//!
//! ```ignore
//! use aula_models::ids::{StudentId, CourseId};
//!
//! fn enrol(course: &CourseId, students: &[StudentId]) { /* ... */ }
//!
//! let course = CourseId::from("c-1");
//! enrol(&course, &[StudentId::from("s-1")]);
//! // enrol(&StudentId::from("s-1"), &[]); // Compile error! Type mismatch.
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Macro to define a strongly-typed ID newtype.
///
/// Deserialization is lenient: strings, numbers, and populated references
/// (`{ "_id": ... }`) all produce an id.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            #[inline]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            #[inline]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            #[inline]
            pub fn into_inner(self) -> String {
                self.0
            }

            #[inline]
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            #[inline]
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            #[inline]
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl AsRef<str> for $name {
            #[inline]
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                aula_core::serde::deserialize_id(deserializer).map(Self)
            }
        }
    };
}

define_id!(
    /// Student identifier.
    StudentId
);

define_id!(
    /// Teacher identifier.
    TeacherId
);

define_id!(
    /// Parent / guardian identifier.
    ParentId
);

define_id!(
    /// Course identifier.
    CourseId
);

define_id!(
    /// Grade record identifier.
    GradeId
);

define_id!(
    /// Attendance record identifier.
    AttendanceId
);

define_id!(
    /// Absence justification identifier.
    JustificationId
);

define_id!(
    /// Calendar event identifier.
    EventId
);

define_id!(
    /// Message identifier.
    MessageId
);

define_id!(
    /// GPS tracking device identifier.
    DeviceId
);

define_id!(
    /// Generated report identifier.
    ReportId
);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_id_accepts_strings_and_numbers() {
        let a: StudentId = serde_json::from_value(json!("s-1")).unwrap();
        let b: StudentId = serde_json::from_value(json!(7)).unwrap();
        assert_eq!(a.as_str(), "s-1");
        assert_eq!(b.as_str(), "7");
    }

    #[test]
    fn test_id_accepts_populated_reference() {
        let id: CourseId = serde_json::from_value(json!({ "_id": "c-9", "name": "Math" })).unwrap();
        assert_eq!(id, CourseId::from("c-9"));
    }

    #[test]
    fn test_id_serializes_transparently() {
        assert_eq!(serde_json::to_value(ReportId::from("r-1")).unwrap(), json!("r-1"));
        assert_eq!(format!("{:?}", EventId::from("e")), "EventId(e)");
    }
}
