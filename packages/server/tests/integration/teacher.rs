use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};

use attendance_server::entity::{student_attendance, teacher_attendance};
use attendance_server::utils::date;

use crate::common::{TestApp, routes};

mod dashboard {
    use super::*;

    #[tokio::test]
    async fn first_visit_checks_teacher_in() {
        let app = TestApp::spawn().await;
        let room = app.create_classroom("10A").await;
        let (teacher, token) = app.create_teacher("t1", Some(room.id)).await;

        let res = app.get_with_token(routes::TEACHER, &token).await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["teacher"]["username"], "t1");
        assert_eq!(res.body["teacher"]["classroom_name"], "10A");
        assert_eq!(res.body["teacher_checkin"]["present"], true);
        assert_eq!(res.body["teacher_checkin"]["date"], date::today().to_string());
        assert_eq!(res.body["teacher_checkin"]["classroom_id"], room.id);
        assert_eq!(res.body["class_marked_today"], false);

        let rows = teacher_attendance::Entity::find()
            .filter(teacher_attendance::Column::TeacherId.eq(teacher.id))
            .count(&app.db)
            .await
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[tokio::test]
    async fn repeat_visits_reuse_the_same_check_in() {
        let app = TestApp::spawn().await;
        let room = app.create_classroom("10A").await;
        let (teacher, token) = app.create_teacher("t1", Some(room.id)).await;

        let first = app.get_with_token(routes::TEACHER, &token).await;
        let second = app.get_with_token(routes::TEACHER, &token).await;

        assert_eq!(second.status, 200);
        assert_eq!(
            first.body["teacher_checkin"]["timestamp"],
            second.body["teacher_checkin"]["timestamp"]
        );

        let rows = teacher_attendance::Entity::find()
            .filter(teacher_attendance::Column::TeacherId.eq(teacher.id))
            .count(&app.db)
            .await
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[tokio::test]
    async fn teacher_without_classroom_can_still_check_in() {
        let app = TestApp::spawn().await;
        let (_, token) = app.create_teacher("floater", None).await;

        let res = app.get_with_token(routes::TEACHER, &token).await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert!(res.body["teacher"]["classroom_id"].is_null());
        assert!(res.body["teacher_checkin"]["classroom_id"].is_null());
        assert_eq!(res.body["class_marked_today"], false);
    }

    #[tokio::test]
    async fn students_are_forbidden() {
        let app = TestApp::spawn().await;
        let room = app.create_classroom("10A").await;
        let (_, token) = app.create_student("s1", "1", room.id).await;

        let res = app.get_with_token(routes::TEACHER, &token).await;

        assert_eq!(res.status, 403);
        assert_eq!(res.body["code"], "FORBIDDEN");
        assert_eq!(res.body["message"], "Only teachers can view this page.");
    }

    #[tokio::test]
    async fn path_without_trailing_slash_is_served() {
        let app = TestApp::spawn().await;
        let (_, token) = app.create_teacher("t1", None).await;

        let res = app.get_with_token("/teacher", &token).await;

        assert_eq!(res.status, 200);
    }
}

mod mark_attendance {
    use super::*;

    #[tokio::test]
    async fn form_lists_only_own_classroom_by_roll_number() {
        let app = TestApp::spawn().await;
        let room = app.create_classroom("10A").await;
        let other = app.create_classroom("10B").await;
        let (_, token) = app.create_teacher("t1", Some(room.id)).await;
        let (s2, _) = app.create_student("s2", "2", room.id).await;
        let (s1, _) = app.create_student("s1", "1", room.id).await;
        app.create_student("x1", "99", other.id).await;

        let res = app.get_with_token(routes::TEACHER_MARK, &token).await;

        assert_eq!(res.status, 200, "{}", res.text);
        let students = res.body["students"].as_array().unwrap();
        assert_eq!(students.len(), 2);
        assert_eq!(students[0]["id"], s1.id);
        assert_eq!(students[0]["username"], "s1");
        assert_eq!(students[0]["field"], format!("present_{}", s1.id));
        assert_eq!(students[1]["id"], s2.id);
    }

    #[tokio::test]
    async fn get_has_no_side_effects() {
        let app = TestApp::spawn().await;
        let room = app.create_classroom("10A").await;
        let (_, token) = app.create_teacher("t1", Some(room.id)).await;
        app.create_student("s1", "1", room.id).await;

        app.get_with_token(routes::TEACHER_MARK, &token).await;

        let rows = student_attendance::Entity::find().count(&app.db).await.unwrap();
        assert_eq!(rows, 0);
        let checkins = teacher_attendance::Entity::find().count(&app.db).await.unwrap();
        assert_eq!(checkins, 0);
    }

    #[tokio::test]
    async fn submitting_records_present_and_absent_and_redirects() {
        let app = TestApp::spawn().await;
        let room = app.create_classroom("10A").await;
        let (_, token) = app.create_teacher("t1", Some(room.id)).await;
        let (s1, _) = app.create_student("s1", "1", room.id).await;
        let (s2, _) = app.create_student("s2", "2", room.id).await;

        let field = format!("present_{}", s1.id);
        let res = app
            .post_form_with_token(routes::TEACHER_MARK, &[(field.as_str(), "on")], &token)
            .await;

        res.assert_redirect(routes::TEACHER);

        let rows = student_attendance::Entity::find()
            .filter(student_attendance::Column::Date.eq(date::today()))
            .order_by_asc(student_attendance::Column::StudentId)
            .all(&app.db)
            .await
            .unwrap();
        assert_eq!(rows.len(), 2);
        let s1_row = rows.iter().find(|r| r.student_id == s1.id).unwrap();
        let s2_row = rows.iter().find(|r| r.student_id == s2.id).unwrap();
        assert!(s1_row.present);
        assert!(!s2_row.present);
        assert!(rows.iter().all(|r| r.marked_by_teacher && r.classroom_id == room.id));

        let dashboard = app.get_with_token(routes::TEACHER, &token).await;
        assert_eq!(dashboard.body["class_marked_today"], true);
    }

    #[tokio::test]
    async fn resubmitting_overwrites_instead_of_duplicating() {
        let app = TestApp::spawn().await;
        let room = app.create_classroom("10A").await;
        let (_, token) = app.create_teacher("t1", Some(room.id)).await;
        let (s1, _) = app.create_student("s1", "1", room.id).await;
        let (s2, _) = app.create_student("s2", "2", room.id).await;

        let f1 = format!("present_{}", s1.id);
        let f2 = format!("present_{}", s2.id);
        app.post_form_with_token(routes::TEACHER_MARK, &[(f1.as_str(), "on")], &token)
            .await
            .assert_redirect(routes::TEACHER);
        app.post_form_with_token(routes::TEACHER_MARK, &[(f2.as_str(), "on")], &token)
            .await
            .assert_redirect(routes::TEACHER);

        let rows = student_attendance::Entity::find().all(&app.db).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert!(!rows.iter().find(|r| r.student_id == s1.id).unwrap().present);
        assert!(rows.iter().find(|r| r.student_id == s2.id).unwrap().present);
    }

    #[tokio::test]
    async fn ids_outside_the_classroom_are_ignored() {
        let app = TestApp::spawn().await;
        let room = app.create_classroom("10A").await;
        let other = app.create_classroom("10B").await;
        let (_, token) = app.create_teacher("t1", Some(room.id)).await;
        app.create_student("s1", "1", room.id).await;
        let (outsider, _) = app.create_student("x1", "99", other.id).await;

        let field = format!("present_{}", outsider.id);
        app.post_form_with_token(routes::TEACHER_MARK, &[(field.as_str(), "on")], &token)
            .await
            .assert_redirect(routes::TEACHER);

        let outsider_rows = student_attendance::Entity::find()
            .filter(student_attendance::Column::StudentId.eq(outsider.id))
            .count(&app.db)
            .await
            .unwrap();
        assert_eq!(outsider_rows, 0);
    }

    #[tokio::test]
    async fn teacher_without_classroom_records_nothing() {
        let app = TestApp::spawn().await;
        let room = app.create_classroom("10A").await;
        let (_, token) = app.create_teacher("floater", None).await;
        app.create_student("s1", "1", room.id).await;

        let page = app.get_with_token(routes::TEACHER_MARK, &token).await;
        assert_eq!(page.body["students"].as_array().unwrap().len(), 0);

        app.post_form_with_token(routes::TEACHER_MARK, &[], &token)
            .await
            .assert_redirect(routes::TEACHER);
        let rows = student_attendance::Entity::find().count(&app.db).await.unwrap();
        assert_eq!(rows, 0);
    }

    #[tokio::test]
    async fn non_teachers_are_forbidden_not_errors() {
        let app = TestApp::spawn().await;
        let room = app.create_classroom("10A").await;
        let (_, student_token) = app.create_student("s1", "1", room.id).await;
        let admin_token = app.create_superuser("root").await;

        for token in [&student_token, &admin_token] {
            let get = app.get_with_token(routes::TEACHER_MARK, token).await;
            assert_eq!(get.status, 403);
            assert_eq!(get.body["message"], "Only teachers can mark attendance.");

            let post = app.post_form_with_token(routes::TEACHER_MARK, &[], token).await;
            assert_eq!(post.status, 403);

            let bare = app.post_empty_with_token(routes::TEACHER_MARK, token).await;
            assert_eq!(bare.status, 403);
            assert_eq!(bare.body["code"], "FORBIDDEN");
            assert_eq!(bare.body["message"], "Only teachers can mark attendance.");
        }
    }
}
