#[cfg(feature = "server")]
pub mod http {
    use axum::{
        extract::State,
        http::StatusCode,
        response::{IntoResponse, Json},
        routing::{get, post},
        Router,
    };
    use friends::{split_paragraphs, Assignment, Reply, SearchBudget, Session};
    use serde::{Deserialize, Serialize};
    use std::net::SocketAddr;
    use std::sync::Arc;
    use tokio::sync::RwLock;
    use tower_http::cors::CorsLayer;
    use tracing::{error, info};

    use crate::formatter::Formatter;

    type SharedSession = Arc<RwLock<Session>>;

    #[derive(Debug, Deserialize)]
    struct AskRequest {
        text: String,
    }

    #[derive(Debug, Serialize)]
    #[serde(untagged)]
    enum AskResponse {
        Accepted {
            accepted: bool,
        },
        Solutions {
            solutions: Vec<SolutionJson>,
            exhausted: bool,
        },
    }

    #[derive(Debug, Serialize)]
    struct SolutionJson {
        assignments: Vec<Assignment>,
        reply: String,
    }

    #[derive(Debug, Serialize)]
    struct ErrorResponse {
        error: String,
    }

    pub async fn start_server(session: Session, host: &str, port: u16) -> anyhow::Result<()> {
        let shared_session = Arc::new(RwLock::new(session));

        let app = Router::new()
            .route("/health", get(health_check))
            .route("/parse", post(parse_text))
            .route("/ask", post(ask))
            .layer(CorsLayer::permissive())
            .with_state(shared_session);

        let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
        info!("Friends server listening on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }

    async fn health_check() -> impl IntoResponse {
        Json(serde_json::json!({
            "status": "ok",
            "service": "friends",
            "version": env!("CARGO_PKG_VERSION")
        }))
    }

    /// Syntax check of a plain-text program, one quoted paragraph after another
    async fn parse_text(State(session): State<SharedSession>, body: String) -> String {
        let limits = session.read().await.limits().clone();
        let formatter = Formatter::new();

        let mut transcript = String::new();
        for paragraph in split_paragraphs(&body) {
            let result = friends::parse(&paragraph.text, &limits).map(|_| ());
            transcript.push_str(&formatter.format_check(&paragraph.text, &result));
        }
        info!("Checked {} bytes of source", body.len());
        transcript
    }

    /// Believes a rule or answers a query against the shared session
    async fn ask(
        State(session): State<SharedSession>,
        Json(payload): Json<AskRequest>,
    ) -> Result<impl IntoResponse, (StatusCode, Json<ErrorResponse>)> {
        if payload.text.trim().is_empty() {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "Text cannot be empty".to_string(),
                }),
            ));
        }

        let mut session = session.write().await;
        let limits = session.limits().clone();

        let reply = session.input(payload.text.trim()).map_err(|e| {
            error!("Failed to parse statement: {}", e);
            (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
        })?;

        let mut solutions = match reply {
            Reply::Accepted => {
                info!(
                    "Accepted rule, knowledge now holds {} rules",
                    session.knowledge().len()
                );
                return Ok(Json(AskResponse::Accepted { accepted: true }));
            }
            Reply::Solutions(solutions) => solutions,
        };

        let mut budget = SearchBudget::from_limits(&limits);
        let mut found = Vec::new();
        let mut exhausted = false;
        while found.len() < limits.max_solutions {
            match solutions.next_within(&mut budget) {
                Ok(Some(solution)) => found.push(SolutionJson {
                    reply: solution.describe(),
                    assignments: solution.assignments,
                }),
                Ok(None) => {
                    exhausted = true;
                    break;
                }
                Err(e) => {
                    error!("Query stopped: {}", e);
                    return Err((
                        StatusCode::UNPROCESSABLE_ENTITY,
                        Json(ErrorResponse {
                            error: e.to_string(),
                        }),
                    ));
                }
            }
        }

        info!(
            "Answered query with {} solution(s) in {} steps",
            found.len(),
            solutions.steps()
        );

        Ok(Json(AskResponse::Solutions {
            solutions: found,
            exhausted,
        }))
    }
}
