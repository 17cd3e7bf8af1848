// src/docs.rs

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::get_me,

        // --- Customers ---
        handlers::customers::list_customers,
        handlers::customers::create_customer,
        handlers::customers::update_customer,
        handlers::customers::delete_customer,
        handlers::customers::analyze_customer,

        // --- Notes ---
        handlers::notes::list_notes,
        handlers::notes::create_note,

        // --- Tasks ---
        handlers::tasks::list_tasks,
        handlers::tasks::create_task,
        handlers::tasks::update_task,

        // --- Meetings ---
        handlers::meetings::list_meetings,
        handlers::meetings::create_meeting,

        // --- Proposals ---
        handlers::proposals::list_proposals,
        handlers::proposals::list_customer_proposals,
        handlers::proposals::create_proposal,

        // --- Expenses ---
        handlers::expenses::list_expenses,
        handlers::expenses::create_expense,

        // --- Services ---
        handlers::services::list_services,

        // --- WhatsApp ---
        handlers::whatsapp::list_templates,
        handlers::whatsapp::list_messages,
        handlers::whatsapp::send_message,

        // --- AI ---
        handlers::ai::generate_message,

        // --- Dashboard ---
        handlers::dashboard::get_stats,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::UserRole,
            models::auth::User,
            models::auth::RegisterUserPayload,
            models::auth::LoginUserPayload,
            models::auth::AuthResponse,

            // --- Customers ---
            models::customer::CustomerStatus,
            models::customer::CustomerTemperature,
            models::customer::Customer,
            models::customer::CreateCustomerPayload,
            models::customer::UpdateCustomerPayload,
            models::analysis::CustomerAnalysis,

            // --- Notes ---
            models::note::NoteType,
            models::note::Note,
            handlers::notes::CreateNotePayload,

            // --- Tasks ---
            models::task::TaskPriority,
            models::task::TaskStatus,
            models::task::TaskType,
            models::task::Task,
            handlers::tasks::CreateTaskPayload,
            handlers::tasks::UpdateTaskPayload,

            // --- Meetings ---
            models::meeting::MeetingStatus,
            models::meeting::Meeting,
            handlers::meetings::CreateMeetingPayload,
            handlers::meetings::UpdateMeetingPayload,

            // --- Proposals ---
            models::proposal::ProposalStatus,
            models::proposal::Proposal,
            models::proposal::ProposalItemInput,
            handlers::proposals::CreateProposalPayload,
            handlers::proposals::UpdateProposalStatusPayload,

            // --- Expenses ---
            models::expense::Expense,
            handlers::expenses::CreateExpensePayload,

            // --- Services ---
            models::service::Service,

            // --- WhatsApp ---
            models::message::MessageDirection,
            models::message::WhatsappMessage,
            models::message::TemplateType,
            models::message::WhatsappTemplate,
            handlers::whatsapp::SendMessagePayload,

            // --- AI ---
            handlers::ai::GenerateMessagePayload,

            // --- Dashboard ---
            models::dashboard::DashboardStats,
            models::dashboard::MonthlyCustomerEntry,
            models::dashboard::TopCustomerEntry,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação e Registro"),
        (name = "Customers", description = "Gestão de Clientes e Classificação"),
        (name = "Notes", description = "Registro de Interações e Anotações de IA"),
        (name = "Tasks", description = "Tarefas Manuais e Geradas pela IA"),
        (name = "Meetings", description = "Agenda de Reuniões"),
        (name = "Proposals", description = "Propostas Comerciais"),
        (name = "Expenses", description = "Despesas"),
        (name = "Services", description = "Catálogo de Serviços"),
        (name = "WhatsApp", description = "Mensagens e Templates"),
        (name = "AI", description = "Assistente de Vendas e Transcrição"),
        (name = "Dashboard", description = "Indicadores Gerenciais")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
