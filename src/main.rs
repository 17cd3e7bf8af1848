//src/main.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, post, put},
    Json, Router,
};
use tokio::net::TcpListener;
use utoipa::OpenApi;

// Declaração dos nossos módulos
mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod integrations;
mod middleware;
mod models;
mod services;

use crate::config::AppState;
use crate::middleware::auth::auth_guard;

#[tokio::main]
async fn main() {
    // Inicializa o logger
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é aceitável aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Primeiro snapshot de provedores (banco + ambiente) e admin padrão
    app_state
        .settings_service
        .reload()
        .await
        .expect("Falha ao carregar as configurações iniciais.");
    app_state
        .auth_service
        .ensure_default_admin()
        .await
        .expect("Falha ao garantir o usuário admin padrão.");

    // Rotas de autenticação (públicas)
    let auth_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login));

    // Rotas de usuário (protegidas pelo middleware)
    let user_routes = Router::new()
        .route("/me", get(handlers::auth::get_me))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let customer_routes = Router::new()
        .route(
            "/",
            post(handlers::customers::create_customer).get(handlers::customers::list_customers),
        )
        .route(
            "/{id}",
            put(handlers::customers::update_customer)
                .delete(handlers::customers::delete_customer),
        )
        .route("/{id}/analyze", post(handlers::customers::analyze_customer))
        .route(
            "/{customer_id}/notes",
            get(handlers::notes::list_notes).post(handlers::notes::create_note),
        )
        .route(
            "/{customer_id}/notes/audio",
            post(handlers::notes::create_audio_note),
        )
        .route(
            "/{customer_id}/proposals",
            get(handlers::proposals::list_customer_proposals),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let task_routes = Router::new()
        .route(
            "/",
            post(handlers::tasks::create_task).get(handlers::tasks::list_tasks),
        )
        .route("/{id}", put(handlers::tasks::update_task))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let meeting_routes = Router::new()
        .route(
            "/",
            post(handlers::meetings::create_meeting).get(handlers::meetings::list_meetings),
        )
        .route("/{id}", put(handlers::meetings::update_meeting))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let proposal_routes = Router::new()
        .route(
            "/",
            post(handlers::proposals::create_proposal).get(handlers::proposals::list_proposals),
        )
        .route(
            "/{id}/status",
            put(handlers::proposals::update_proposal_status),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let expense_routes = Router::new()
        .route(
            "/",
            post(handlers::expenses::create_expense).get(handlers::expenses::list_expenses),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Rotas de WhatsApp protegidas; o webhook fica FORA deste router porque
    // é o provedor quem chama, sem token nosso.
    let whatsapp_routes = Router::new()
        .route("/templates", get(handlers::whatsapp::list_templates))
        .route(
            "/messages/{customer_id}",
            get(handlers::whatsapp::list_messages),
        )
        .route("/send", post(handlers::whatsapp::send_message))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let settings_routes = Router::new()
        .route(
            "/",
            get(handlers::settings::get_settings).put(handlers::settings::update_settings),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let ai_routes = Router::new()
        .route("/generate-message", post(handlers::ai::generate_message))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let protected_misc = Router::new()
        .route("/api/transcribe", post(handlers::ai::transcribe))
        .route("/api/test/openai", post(handlers::settings::test_openai))
        .route("/api/dashboard/stats", get(handlers::dashboard::get_stats))
        .route("/api/services", get(handlers::services::list_services))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route(
            "/api/docs/openapi.json",
            get(|| async { Json(docs::ApiDoc::openapi()) }),
        )
        .route(
            "/api/whatsapp/webhook",
            post(handlers::whatsapp::inbound_webhook),
        )
        .nest("/api/auth", auth_routes)
        .nest("/api/users", user_routes)
        .nest("/api/customers", customer_routes)
        .nest("/api/tasks", task_routes)
        .nest("/api/meetings", meeting_routes)
        .nest("/api/proposals", proposal_routes)
        .nest("/api/expenses", expense_routes)
        .nest("/api/whatsapp", whatsapp_routes)
        .nest("/api/settings", settings_routes)
        .nest("/api/ai", ai_routes)
        .merge(protected_misc)
        .with_state(app_state);

    // Inicia o servidor
    let addr = "0.0.0.0:3001";
    let listener = TcpListener::bind(addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app)
        .await
        .expect("Erro no servidor Axum");
}
