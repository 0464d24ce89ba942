use aula_core::FieldErrors;
use validator::Validate;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ModalMode {
    #[default]
    Closed,
    Create,
    /// Editing the record with this id.
    Edit(String),
}

/// The create / edit modal: mode, the form being typed, and inline errors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModalState<F> {
    pub mode: ModalMode,
    pub form: F,
    pub errors: FieldErrors,
}

impl<F: Default + Validate> ModalState<F> {
    pub fn open_create(&mut self) {
        *self = Self {
            mode: ModalMode::Create,
            ..Self::default()
        };
    }

    pub fn open_edit(&mut self, id: impl Into<String>, form: F) {
        *self = Self {
            mode: ModalMode::Edit(id.into()),
            form,
            errors: FieldErrors::new(),
        };
    }

    pub fn close(&mut self) {
        *self = Self::default();
    }

    pub fn is_open(&self) -> bool {
        self.mode != ModalMode::Closed
    }

    /// Checks required fields, recording inline errors. Returns `true`
    /// when the form can be sent.
    pub fn validate(&mut self) -> bool {
        match self.form.validate() {
            Ok(()) => {
                self.errors = FieldErrors::new();
                true
            }
            Err(errors) => {
                self.errors = FieldErrors::from(errors);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aula_models::StudentForm;

    #[test]
    fn test_validate_records_missing_fields() {
        let mut modal = ModalState::<StudentForm>::default();
        modal.open_create();
        assert!(modal.is_open());
        assert!(!modal.validate());
        assert!(modal.errors.get("dni").is_some());

        modal.form.first_name = "Ana".into();
        modal.form.last_name = "Torres".into();
        modal.form.dni = "40111222".into();
        assert!(modal.validate());
        assert!(modal.errors.is_empty());
    }

    #[test]
    fn test_close_resets_everything() {
        let mut modal = ModalState::<StudentForm>::default();
        modal.open_edit(
            "s-1",
            StudentForm {
                first_name: "Ana".into(),
                ..StudentForm::default()
            },
        );
        assert_eq!(modal.mode, ModalMode::Edit("s-1".into()));
        modal.close();
        assert_eq!(modal, ModalState::default());
    }
}
