pub mod customer_repo;
pub use customer_repo::CustomerRepository;
pub mod user_repo;
pub use user_repo::UserRepository;
pub mod note_repo;
pub use note_repo::NoteRepository;
pub mod task_repo;
pub use task_repo::TaskRepository;
pub mod message_repo;
pub use message_repo::MessageRepository;
pub mod meeting_repo;
pub use meeting_repo::MeetingRepository;
pub mod proposal_repo;
pub use proposal_repo::ProposalRepository;
pub mod expense_repo;
pub use expense_repo::ExpenseRepository;
pub mod service_repo;
pub use service_repo::ServiceRepository;
pub mod settings_repo;
pub use settings_repo::SettingsRepository;
pub mod dashboard_repo;
pub use dashboard_repo::DashboardRepository;
