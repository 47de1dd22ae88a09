//! Feed report pages and handlers.
//!
//! Every route here sits behind the session gate and hands the signed-in
//! user to the report ports as an [`crate::domain::Actor`].

use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;
use tracing::{info, warn};

use crate::domain::ports::REPORT_NOT_FOUND;
use crate::domain::{ApiResult, Error, ReportDraft, ReportId};

use super::gate::RequireSession;
use super::session::SessionUser;
use super::state::HttpState;
use super::{see_other, views};

/// New report form body.
#[derive(Debug, Default, Deserialize)]
pub struct ReportForm {
    pub feed_name: Option<String>,
    pub feed_code: Option<String>,
    pub amount: Option<String>,
}

#[get("/report/new", wrap = "RequireSession::to_landing()")]
pub async fn new_report_form(user: SessionUser) -> HttpResponse {
    views::page(views::new_report(&user))
}

/// Record a report dated today; an unusable amount is stored as zero.
#[post("/report/new", wrap = "RequireSession::to_landing()")]
pub async fn create_report(
    state: web::Data<HttpState>,
    user: SessionUser,
    form: web::Form<ReportForm>,
) -> ApiResult<HttpResponse> {
    let draft = ReportDraft::try_from_parts(
        form.feed_name.as_deref(),
        form.feed_code.as_deref(),
        form.amount.as_deref(),
    )?;
    if let Some(rejected) = draft.rejected_amount() {
        warn!(user_id = %user.id, error = %rejected, "report amount replaced with zero");
    }
    let report = state.reports.create_report(&user.actor(), draft).await?;
    info!(user_id = %user.id, report_id = %report.id(), "report created");
    Ok(see_other("/dashboard"))
}

/// Every report for administrators, the user's own otherwise.
#[get("/reports", wrap = "RequireSession::to_landing()")]
pub async fn list_reports(
    state: web::Data<HttpState>,
    user: SessionUser,
) -> ApiResult<HttpResponse> {
    let reports = state.reports_query.visible_reports(&user.actor()).await?;
    Ok(views::page(views::reports(&user, &reports)))
}

#[get("/report/{id}", wrap = "RequireSession::to_landing()")]
pub async fn report_detail(
    state: web::Data<HttpState>,
    user: SessionUser,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    // A malformed id can name no report.
    let id: ReportId = path
        .parse()
        .map_err(|_| Error::not_found(REPORT_NOT_FOUND))?;
    let report = state.reports_query.report(&id, &user.actor()).await?;
    Ok(views::page(views::report(&user, &report)))
}
