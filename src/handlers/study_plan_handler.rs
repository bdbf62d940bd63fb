use actix_web::{delete, get, post, put, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::dto::{
        request::{GenerateStudyPlanRequest, UpdateTaskRequest},
        response::{GeneratedResponse, MessageResponse, StudyPlanResponse},
    },
};

#[post("/study-plans/generate")]
async fn generate_study_plan(
    state: web::Data<AppState>,
    request: web::Json<GenerateStudyPlanRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let plan = state
        .study_plan_service
        .generate_plan(auth.user_id(), request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(GeneratedResponse {
        id: plan.id,
        data: plan.days,
    }))
}

#[get("/study-plans")]
async fn list_study_plans(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let plans: Vec<StudyPlanResponse> = state
        .study_plan_service
        .list_plans(auth.user_id())
        .await?
        .into_iter()
        .map(StudyPlanResponse::from)
        .collect();
    Ok(HttpResponse::Ok().json(plans))
}

#[get("/study-plans/{id}")]
async fn get_study_plan(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let plan = state.study_plan_service.get_plan(auth.user_id(), &id).await?;
    Ok(HttpResponse::Ok().json(StudyPlanResponse::from(plan)))
}

#[put("/study-plans/{id}/days/{day}/tasks/{task}")]
async fn update_task(
    state: web::Data<AppState>,
    path: web::Path<(String, usize, usize)>,
    request: web::Json<UpdateTaskRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let (id, day, task) = path.into_inner();
    let plan = state
        .study_plan_service
        .set_task_completed(auth.user_id(), &id, day, task, request.completed)
        .await?;
    Ok(HttpResponse::Ok().json(StudyPlanResponse::from(plan)))
}

#[delete("/study-plans/{id}")]
async fn delete_study_plan(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    state.study_plan_service.delete_plan(auth.user_id(), &id).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Study plan deleted")))
}

#[cfg(test)]
mod tests {
    use crate::handlers::tests::{authed, test_state};
    use crate::test_utils::fixtures::STUDY_PLAN_JSON;
    use actix_web::{http::StatusCode, test};
    use serde_json::{json, Value};

    #[actix_web::test]
    async fn test_generate_plan_and_complete_task() {
        let (state, client) = test_state();
        client.push(Ok(STUDY_PLAN_JSON.to_string()));
        let app = init_app!(state).await;

        let req = authed(test::TestRequest::post().uri("/api/study-plans/generate"))
            .set_json(json!({
                "subjects": ["Math", "Physics"],
                "start_date": "2026-11-01",
                "exam_date": "2026-11-04",
                "hours_per_day": 2
            }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"][0]["date"], "2026-11-02");
        assert_eq!(body["data"][0]["tasks"][0]["priority"], "high");
        let id = body["id"].as_str().unwrap().to_string();

        let req = authed(
            test::TestRequest::put().uri(&format!("/api/study-plans/{}/days/0/tasks/0", id)),
        )
        .set_json(json!({"completed": true}))
        .to_request();
        let plan: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(plan["days"][0]["tasks"][0]["completed"], true);
        assert_eq!(plan["progress"], 0.5);

        let req = authed(test::TestRequest::get().uri("/api/study-plans")).to_request();
        let listed: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(listed[0]["id"], id.as_str());
        assert_eq!(listed[0]["progress"], 0.5);

        let req = authed(
            test::TestRequest::put().uri(&format!("/api/study-plans/{}/days/9/tasks/0", id)),
        )
        .set_json(json!({"completed": true}))
        .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::NOT_FOUND
        );
    }
}
