use crate::common::{TestApp, routes};

#[tokio::test]
async fn counters_reflect_today() {
    let app = TestApp::spawn().await;
    let room_a = app.create_classroom("10A").await;
    let room_b = app.create_classroom("10B").await;
    let (_, t1) = app.create_teacher("t1", Some(room_a.id)).await;
    app.create_teacher("t2", Some(room_b.id)).await;
    app.create_student("s1", "1", room_a.id).await;
    app.create_student("s2", "2", room_a.id).await;
    app.create_student("s3", "3", room_b.id).await;
    let admin = app.create_superuser("root").await;

    // t1 checks in and marks the roll twice; t2 never shows up.
    app.get_with_token(routes::TEACHER, &t1).await;
    app.post_form_with_token(routes::TEACHER_MARK, &[], &t1).await;
    app.post_form_with_token(routes::TEACHER_MARK, &[], &t1).await;

    let res = app.get_with_token(routes::ADMIN, &admin).await;

    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["total_students"], 3);
    assert_eq!(res.body["total_teachers"], 2);
    assert_eq!(res.body["teachers_checked_in_today"], 1);
    assert_eq!(res.body["classes_marked_today"], 1);
    assert_eq!(
        res.body["today"],
        attendance_server::utils::date::today().to_string()
    );
}

#[tokio::test]
async fn lists_ten_most_recent_complaints() {
    let app = TestApp::spawn().await;
    let room = app.create_classroom("10A").await;
    let (_, s1) = app.create_student("s1", "R1", room.id).await;
    let admin = app.create_superuser("root").await;

    for i in 0..12 {
        let msg = format!("complaint {i}");
        app.post_form_with_token(routes::STUDENT, &[("message", msg.as_str())], &s1)
            .await
            .assert_redirect(routes::STUDENT);
    }

    let res = app.get_with_token(routes::ADMIN, &admin).await;

    let recent = res.body["recent_complaints"].as_array().unwrap();
    assert_eq!(recent.len(), 10);
    assert_eq!(recent[0]["message"], "complaint 11");
    assert_eq!(recent[9]["message"], "complaint 2");
    assert_eq!(recent[0]["username"], "s1");
    assert_eq!(recent[0]["roll_number"], "R1");
}

#[tokio::test]
async fn empty_school_has_zero_counters() {
    let app = TestApp::spawn().await;
    let admin = app.create_superuser("root").await;

    let res = app.get_with_token(routes::ADMIN, &admin).await;

    assert_eq!(res.status, 200);
    assert_eq!(res.body["total_students"], 0);
    assert_eq!(res.body["classes_marked_today"], 0);
    assert_eq!(res.body["recent_complaints"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn non_superusers_are_forbidden() {
    let app = TestApp::spawn().await;
    let room = app.create_classroom("10A").await;
    let (_, teacher) = app.create_teacher("t1", Some(room.id)).await;
    let (_, student) = app.create_student("s1", "1", room.id).await;

    for token in [&teacher, &student] {
        let res = app.get_with_token(routes::ADMIN, token).await;
        assert_eq!(res.status, 403);
        assert_eq!(res.body["message"], "Only superusers can view this page.");
    }
}
