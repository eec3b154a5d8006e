//! Local stand-in for the inference service used by route tests.

use actix_web::{App, HttpResponse, HttpServer, web};
use serde_json::{Value, json};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct StubReply {
    status: u16,
    answer: Value,
}

impl StubReply {
    /// Replies 200 with `answer` as the model's JSON text.
    pub fn ok(answer: Value) -> Self {
        Self {
            status: 200,
            answer,
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            answer: Value::Null,
        }
    }
}

#[derive(Clone)]
struct StubState {
    reply: StubReply,
    calls: Arc<AtomicUsize>,
    last_request: Arc<Mutex<Option<Value>>>,
}

/// Handle to a running stub.
pub struct Stub {
    pub base_url: String,
    calls: Arc<AtomicUsize>,
    last_request: Arc<Mutex<Option<Value>>>,
}

impl Stub {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Body of the most recent `generateContent` call.
    pub fn last_request(&self) -> Option<Value> {
        self.last_request.lock().unwrap().clone()
    }
}

async fn generate(state: web::Data<StubState>, body: web::Json<Value>) -> HttpResponse {
    state.calls.fetch_add(1, Ordering::SeqCst);
    *state.last_request.lock().unwrap() = Some(body.into_inner());
    let reply = &state.reply;
    if reply.status != 200 {
        let status = actix_web::http::StatusCode::from_u16(reply.status)
            .unwrap_or(actix_web::http::StatusCode::INTERNAL_SERVER_ERROR);
        return HttpResponse::build(status).json(json!({"error": {"code": reply.status}}));
    }
    HttpResponse::Ok().json(json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": reply.answer.to_string()}]},
            "finishReason": "STOP"
        }]
    }))
}

pub fn spawn_stub(reply: StubReply) -> Stub {
    let calls = Arc::new(AtomicUsize::new(0));
    let last_request = Arc::new(Mutex::new(None));
    let state = StubState {
        reply,
        calls: calls.clone(),
        last_request: last_request.clone(),
    };
    let server = HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .route("/v1beta/models/{call}", web::post().to(generate))
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .unwrap();
    let addr = server.addrs()[0];
    actix_web::rt::spawn(server.run());
    Stub {
        base_url: format!("http://{}", addr),
        calls,
        last_request,
    }
}
