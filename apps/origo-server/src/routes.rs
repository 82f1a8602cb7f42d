use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Multipart, Request, State};
use axum::http::header::CONTENT_TYPE;
use axum::routing::{get, post};
use axum::{async_trait, Form, Json, Router};
use origo_astro::vedic::{render_chart, Divisor};
use origo_astro::ProfileRequest;
use origo_oracle::{ask, ChatRequestContext};
use origo_store::{opening_balance, StoreError, UserRecord};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::{ApiError, ChatFailure};
use crate::state::AppState;

const DEFAULT_FOCUS: &str = "D1";

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/api/save_user_data", post(save_user_data))
        .route("/api/chat_analysis", post(chat_analysis))
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

#[derive(Debug, Default, Deserialize)]
pub struct SaveUserForm {
    pub uid: Option<String>,
    pub name: Option<String>,
    pub dob: Option<String>,
    pub time: Option<String>,
    pub place: Option<String>,
    pub gender: Option<String>,
    pub email: Option<String>,
    pub lang: Option<String>,
    pub status: Option<String>,
}

impl SaveUserForm {
    fn set(&mut self, field: &str, value: String) {
        let slot = match field {
            "uid" => &mut self.uid,
            "name" => &mut self.name,
            "dob" => &mut self.dob,
            "time" => &mut self.time,
            "place" => &mut self.place,
            "gender" => &mut self.gender,
            "email" => &mut self.email,
            "lang" => &mut self.lang,
            "status" => &mut self.status,
            _ => return,
        };
        *slot = Some(value);
    }

    async fn from_multipart(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut form = SaveUserForm::default();
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::BadRequest(e.body_text()))?
        {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };
            let value = field.text().await.map_err(|e| ApiError::BadRequest(e.body_text()))?;
            form.set(&name, value);
        }
        Ok(form)
    }
}

/// Browsers post the profile form as multipart (`FormData`); plain
/// urlencoded bodies are accepted too.
#[async_trait]
impl<S> FromRequest<S> for SaveUserForm
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let multipart = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.trim_start().to_ascii_lowercase().starts_with("multipart/form-data"));

        if multipart {
            let body = Multipart::from_request(req, state)
                .await
                .map_err(|e| ApiError::BadRequest(e.body_text()))?;
            return SaveUserForm::from_multipart(body).await;
        }
        let Form(form) = Form::<SaveUserForm>::from_request(req, state)
            .await
            .map_err(|e| ApiError::BadRequest(e.body_text()))?;
        Ok(form)
    }
}

async fn save_user_data(
    State(state): State<AppState>,
    form: SaveUserForm,
) -> Result<Json<Value>, ApiError> {
    let uid = form
        .uid
        .as_deref()
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .ok_or(ApiError::MissingUid)?
        .to_string();

    let request = ProfileRequest {
        name: form.name.clone().unwrap_or_default(),
        dob: form.dob.clone().unwrap_or_default(),
        tob: form.time.clone().unwrap_or_default(),
        city: form.place.clone().unwrap_or_default(),
    };
    let generated = state.profiles.generate(&request).await?;

    let credits = opening_balance(state.store.as_ref(), &uid, &state.credits).await?;

    let mut record = UserRecord::from_generated(&uid, generated);
    let profile = &mut record.profile;
    profile.email = form.email;
    profile.gender = form.gender;
    profile.place = form.place;
    profile.status = form.status;
    profile.lang = form.lang;
    profile.credits = Some(credits);

    state.store.put_user(&uid, &record).await?;
    log::info!("Saved profile for '{}' with {} credits", uid, credits);

    Ok(Json(json!({ "status": "success", "user_id": uid })))
}

#[derive(Debug, Default, Deserialize)]
pub struct ChatRequest {
    pub uid: Option<String>,
    pub payer_uid: Option<String>,
    #[serde(default)]
    pub message: String,
    pub chart_focus: Option<String>,
    pub cost: Option<u32>,
}

#[derive(Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatReply {
    pub reply: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_credits: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl ChatReply {
    fn text(reply: impl Into<String>) -> Self {
        Self { reply: reply.into(), ..Self::default() }
    }

    fn low_balance(balance: u32) -> Self {
        Self {
            reply: format!("Low Balance: {}", balance),
            error: Some("low_balance".to_string()),
            ..Self::default()
        }
    }
}

async fn chat_analysis(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatReply>, ChatFailure> {
    let Json(request) = payload?;
    let Some(target_uid) = request.uid.as_deref().filter(|u| !u.is_empty()) else {
        return Ok(Json(ChatReply::text("No data found.")));
    };
    let Some(record) = state.store.get_user(target_uid).await? else {
        return Ok(Json(ChatReply::text("No data found.")));
    };

    let payer_uid = request.payer_uid.as_deref().filter(|u| !u.is_empty()).unwrap_or(target_uid);
    let cost = request.cost.unwrap_or(state.credits.default_cost);
    let balance = state.store.credits(payer_uid).await?;
    if balance < cost {
        return Ok(Json(ChatReply::low_balance(balance)));
    }

    let focus_label = request.chart_focus.as_deref().unwrap_or(DEFAULT_FOCUS).trim().to_string();
    let ctx = ChatRequestContext {
        client_name: record.profile.birth.name.clone(),
        client_gender: record.profile.gender.clone().unwrap_or_default(),
        d1_text: render_chart(record.charts.get(Divisor::D1)),
        focus_text: render_chart(record.charts.chart_for_label(&focus_label)),
        focus_label,
        message: request.message,
    };

    let Some(oracle) = state.oracle.as_ref() else {
        return Ok(Json(ChatReply::text("API Error: Groq not connected")));
    };
    let answer = ask(oracle.as_ref(), &ctx).await?;

    let new_credits = match state.store.debit_credits(payer_uid, cost).await {
        Ok(remaining) => remaining,
        Err(StoreError::InsufficientCredits { balance, .. }) => {
            return Ok(Json(ChatReply::low_balance(balance)));
        }
        Err(e) => return Err(e.into()),
    };
    log::info!("Chat for '{}' charged '{}' {} credit(s), {} left", target_uid, payer_uid, cost, new_credits);

    Ok(Json(ChatReply {
        reply: answer.reply,
        error: None,
        new_credits: Some(new_credits),
        suggestions: answer.suggestions,
    }))
}
