mod common;

use aula::aula_models::{
    CourseId, DeviceId, GenerateReportRequest, MonthRange, ReportKind, StudentId,
};
use aula::modules::attendance::AttendancePage;
use aula::modules::calendar::CalendarPage;
use aula::modules::crud::ModalMode;
use aula::modules::gps::GpsPage;
use aula::modules::grades::GradesPage;
use aula::modules::messages::MessagesPage;
use aula::modules::parents::ParentsPage;
use aula::modules::reports::ReportsPage;
use aula::modules::students::{StudentService, StudentsPage};
use chrono::{NaiveDate, Utc};
use common::{FakeApi, VALID_TOKEN, signed_in_state, spawn_fake_api};

fn last_query(api: &FakeApi, path: &str) -> String {
    api.fake
        .hits(path)
        .last()
        .and_then(|r| r.query.clone())
        .unwrap_or_default()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[tokio::test]
async fn test_students_back_navigation_and_immediate_search() {
    let api = spawn_fake_api(25).await;
    let state = signed_in_state(&api, VALID_TOKEN);

    let page = StudentsPage::new(&state);
    page.settled().await;
    assert!(page.list_state().is_success());
    assert!(page.stats_state().unwrap().is_success());
    assert!(!page.previous_page());

    assert!(page.next_page());
    page.settled().await;
    assert!(page.previous_page());
    assert_eq!(page.filters().page, 1);

    page.search_now("40000003");
    let list = page.settled().await.data.unwrap();
    assert_eq!(list.items.len(), 1);
    assert_eq!(list.items[0].id.as_str(), "s-3");
    assert!(last_query(&api, "/api/students").contains("search=40000003"));

    assert!(!page.is_saving());
    assert!(!page.is_deleting());
}

#[tokio::test]
async fn test_students_by_course_asks_for_a_full_page() {
    let api = spawn_fake_api(3).await;
    let state = signed_in_state(&api, VALID_TOKEN);

    let students = StudentService::by_course(&state.client, &CourseId::new("c-1"))
        .await
        .unwrap();
    assert_eq!(students.total(), 3);

    let query = last_query(&api, "/api/students");
    assert!(query.contains("course=c-1"));
    assert!(query.contains("limit=100"));
}

#[tokio::test]
async fn test_grades_course_filter_narrows_list_and_averages() {
    let api = spawn_fake_api(0).await;
    let state = signed_in_state(&api, VALID_TOKEN);

    let page = GradesPage::new(&state);
    page.averages_handle().settled().await;
    assert_eq!(page.averages().len(), 2);
    assert_eq!(page.averages()[1].average, 8.25);

    page.filter_by_course(Some(CourseId::new("c-1")));
    page.filter_by_student(Some(StudentId::new("s-4")));
    page.settled().await;
    page.averages_handle().settled().await;

    let averages = page.averages();
    assert_eq!(averages.len(), 1);
    assert_eq!(averages[0].subject, "Matemática");
    let query = last_query(&api, "/api/grades");
    assert!(query.contains("course=c-1"));
    assert!(query.contains("student=s-4"));

    page.filter_by_course(None);
    page.settled().await;
    assert!(!last_query(&api, "/api/grades").contains("course="));
}

#[tokio::test]
async fn test_attendance_follows_selected_date_and_course() {
    let api = spawn_fake_api(0).await;
    let state = signed_in_state(&api, VALID_TOKEN);

    let page = AttendancePage::new(&state, date(2024, 5, 6));
    page.settled().await;
    assert!(last_query(&api, "/api/attendance").contains("date=2024-05-06"));

    page.select_date(date(2024, 5, 7));
    page.select_course(Some(CourseId::new("c-2")));
    page.settled().await;
    let query = last_query(&api, "/api/attendance");
    assert!(query.contains("date=2024-05-07"));
    assert!(query.contains("course=c-2"));
}

#[tokio::test]
async fn test_calendar_month_navigation() {
    let api = spawn_fake_api(0).await;
    let state = signed_in_state(&api, VALID_TOKEN);

    let page = CalendarPage::new(&state, MonthRange::of(2024, 5).unwrap());
    page.settled().await;
    assert_eq!(page.items().len(), 3);

    let day = page.events_on(date(2024, 5, 24));
    let titles: Vec<&str> = day.iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, ["Reunión de padres", "Acto 25 de Mayo"]);
    assert!(page.events_on(date(2024, 5, 25)).is_empty());

    assert!(!page.show_month(2024, 13));
    assert!(page.show_month(2024, 6));
    page.settled().await;
    assert_eq!(page.items().len(), 1);
    assert_eq!(page.items()[0].title, "Día de la bandera");
    assert!(last_query(&api, "/api/events").contains("from=2024-06-01"));
}

#[tokio::test]
async fn test_generated_report_links_to_uploads() {
    let api = spawn_fake_api(0).await;
    let state = signed_in_state(&api, VALID_TOKEN);

    let page = ReportsPage::new(&state);
    let report = page
        .generate(GenerateReportRequest {
            title: "Asistencia mayo".into(),
            kind: ReportKind::Attendance,
            ..GenerateReportRequest::default()
        })
        .await
        .unwrap();

    assert_eq!(report.kind, ReportKind::Attendance);
    assert!(!page.modal().is_open());
    let root = api.base_url.trim_end_matches("/api");
    assert_eq!(
        page.download_url(&report),
        Some(format!("{root}/uploads/reports/r-1.pdf"))
    );
    assert_eq!(state.toaster.active()[0].title, "Report created");
}

#[tokio::test]
async fn test_reply_prefills_compose_form() {
    let api = spawn_fake_api(0).await;
    let state = signed_in_state(&api, VALID_TOKEN);

    let page = MessagesPage::new(&state);
    page.settled().await;
    page.unread_handle().settled().await;
    assert_eq!(page.unread_count(), 1);

    let message = page.items()[0].clone();
    page.reply(&message);
    let modal = page.modal();
    assert_eq!(modal.mode, ModalMode::Create);
    assert_eq!(modal.form.recipients, vec!["t-1".to_string()]);
    assert_eq!(modal.form.subject, "Re: Reunión");

    page.close_modal();
    assert!(!page.modal().is_open());
}

#[tokio::test]
async fn test_gps_positions_without_timestamp_are_stale() {
    let api = spawn_fake_api(0).await;
    let state = signed_in_state(&api, VALID_TOKEN);

    let page = GpsPage::new(&state);
    page.locations_handle().settled().await;

    let bus = DeviceId::new("d-1");
    assert_eq!(page.location_of(&bus).map(|l| l.speed), Some(32.5));
    assert!(page.location_of(&DeviceId::new("d-9")).is_none());
    assert_eq!(page.stale_devices(Utc::now()), vec![bus]);
}

#[tokio::test]
async fn test_idle_pages_report_no_pending_writes() {
    let api = spawn_fake_api(0).await;
    let state = signed_in_state(&api, VALID_TOKEN);

    assert!(!ParentsPage::new(&state).is_linking());
    assert!(!aula::modules::justifications::JustificationsPage::new(&state).is_reviewing());
}
