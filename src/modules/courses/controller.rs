use std::ops::Deref;

use aula_cache::{Mutation, MutationError, keys};
use aula_models::{Course, CourseId, EnrollStudentsRequest, StudentId};

use crate::modules::courses::{CourseService, Courses};
use crate::modules::crud::CrudPage;
use crate::notifications::ToastRequest;
use crate::state::AppState;

pub struct CoursesPage {
    crud: CrudPage<Courses>,
    enroll: Mutation<(CourseId, EnrollStudentsRequest), Course>,
}

impl Deref for CoursesPage {
    type Target = CrudPage<Courses>;

    fn deref(&self) -> &Self::Target {
        &self.crud
    }
}

impl CoursesPage {
    pub fn new(state: &AppState) -> Self {
        let client = state.client.clone();
        let ok = state.toaster.clone();
        let failed = state.toaster.clone();
        let enroll = Mutation::new(
            state.cache.clone(),
            move |(course, request): (CourseId, EnrollStudentsRequest)| {
                let client = client.clone();
                async move { CourseService::enroll(&client, &course, &request).await }
            },
        )
        .invalidates_all(keys::invalidate::course_enrollment())
        .on_success(move |course: &Course| {
            ok.toast(ToastRequest::success(
                "Students enrolled",
                format!("{} now has {} students", course.name, course.student_count),
            ));
        })
        .on_error(move |error| {
            failed.toast(ToastRequest::error("Error", error.message()));
        });

        Self {
            crud: CrudPage::new(state),
            enroll,
        }
    }

    pub async fn enroll(
        &self,
        course: CourseId,
        students: Vec<StudentId>,
    ) -> Result<Course, MutationError> {
        let request = EnrollStudentsRequest {
            student_ids: students,
        };
        self.enroll.mutate((course, request)).await
    }
}
