use aula_cache::{QueryKey, keys};
use aula_models::{Teacher, TeacherForm, TeacherStats};

use crate::modules::crud::Resource;

pub struct Teachers;

impl Resource for Teachers {
    type Item = Teacher;
    type Form = TeacherForm;
    type Stats = TeacherStats;

    const PATH: &'static str = "/teachers";
    const KEY: &'static str = keys::teachers::ROOT;
    const LABEL: &'static str = "Teacher";

    fn id(item: &Teacher) -> String {
        item.id.to_string()
    }

    fn form_for(item: &Teacher) -> TeacherForm {
        TeacherForm::from(item)
    }

    fn invalidates() -> Vec<QueryKey> {
        keys::invalidate::teacher_write()
    }

    fn stats_key() -> Option<QueryKey> {
        Some(keys::teachers::stats())
    }
}
