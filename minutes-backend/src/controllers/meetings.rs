//! Meetings REST API
//!
//! CRUD over meeting records plus substring search. Creating a meeting, or
//! updating one with `regenerate_summary`, runs the notes through the
//! summarizer before the record is written.

use actix_web::{error::InternalError, web, HttpResponse, Responder};
use minutes_types::{CreateMeetingRequest, ErrorResponse, MeetingsQuery, UpdateMeetingRequest};

use crate::ai::summarize_or_fallback;
use crate::db::DbError;
use crate::AppState;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/meetings")
            .app_data(json_config())
            .route("", web::get().to(list_meetings))
            .route("", web::post().to(create_meeting))
            .route("/{id}", web::get().to(get_meeting))
            .route("/{id}", web::put().to(update_meeting))
            .route("/{id}", web::delete().to(delete_meeting)),
    );
}

/// Malformed bodies get the same `{"error": ...}` shape as every other failure
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let resp = HttpResponse::BadRequest().json(ErrorResponse::new(format!(
            "Invalid request body: {}",
            err
        )));
        InternalError::from_response(err, resp).into()
    })
}

fn db_error(action: &str, e: DbError) -> HttpResponse {
    log::error!("[DB] Failed to {}: {}", action, e);
    HttpResponse::InternalServerError().json(ErrorResponse::new(format!("Database error: {}", e)))
}

fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new("Meeting not found"))
}

/// List meetings, newest first, optionally filtered by `?q=`
async fn list_meetings(
    data: web::Data<AppState>,
    query: web::Query<MeetingsQuery>,
) -> impl Responder {
    let result = match query.q.as_deref() {
        Some(q) => data.db.search_meetings(q),
        None => data.db.list_meetings(),
    };

    match result {
        Ok(meetings) => HttpResponse::Ok().json(meetings),
        Err(e) => db_error("list meetings", e),
    }
}

async fn get_meeting(data: web::Data<AppState>, path: web::Path<i64>) -> impl Responder {
    let id = path.into_inner();

    match data.db.get_meeting(id) {
        Ok(Some(meeting)) => HttpResponse::Ok().json(meeting),
        Ok(None) => not_found(),
        Err(e) => db_error("get meeting", e),
    }
}

/// Create a meeting and attach an AI summary
async fn create_meeting(
    data: web::Data<AppState>,
    body: web::Json<CreateMeetingRequest>,
) -> impl Responder {
    let req = body.into_inner();
    if let Err(e) = req.validate() {
        return HttpResponse::UnprocessableEntity().json(ErrorResponse::new(e.to_string()));
    }

    log::info!("Creating meeting: {}", req.title);

    let summary = summarize_or_fallback(data.summarizer.as_ref(), &req.content).await;

    match data.db.create_meeting(&req.title, &req.content, Some(&summary)) {
        Ok(meeting) => {
            log::info!("Meeting saved (id: {})", meeting.id);
            HttpResponse::Created().json(meeting)
        }
        Err(e) => db_error("create meeting", e),
    }
}

/// Overwrite title and content; summary fields only change on request
async fn update_meeting(
    data: web::Data<AppState>,
    path: web::Path<i64>,
    body: web::Json<UpdateMeetingRequest>,
) -> impl Responder {
    let id = path.into_inner();
    let req = body.into_inner();
    if let Err(e) = req.validate() {
        return HttpResponse::UnprocessableEntity().json(ErrorResponse::new(e.to_string()));
    }

    // Don't spend a model call on a meeting that isn't there
    match data.db.get_meeting(id) {
        Ok(Some(_)) => {}
        Ok(None) => return not_found(),
        Err(e) => return db_error("get meeting", e),
    }

    let regenerated = if req.regenerate_summary {
        log::info!("Regenerating summary for meeting {}", id);
        Some(summarize_or_fallback(data.summarizer.as_ref(), &req.content).await)
    } else {
        None
    };

    match data
        .db
        .update_meeting(id, &req.title, &req.content, regenerated.as_ref())
    {
        Ok(Some(meeting)) => HttpResponse::Ok().json(meeting),
        Ok(None) => not_found(),
        Err(e) => db_error("update meeting", e),
    }
}

/// Delete a meeting. Deleting one that is already gone is a no-op.
async fn delete_meeting(data: web::Data<AppState>, path: web::Path<i64>) -> impl Responder {
    let id = path.into_inner();

    match data.db.delete_meeting(id) {
        Ok(true) => {
            log::info!("Meeting {} deleted", id);
            HttpResponse::NoContent().finish()
        }
        Ok(false) => {
            log::debug!("Delete of missing meeting {} ignored", id);
            HttpResponse::NoContent().finish()
        }
        Err(e) => db_error("delete meeting", e),
    }
}
