// src/services/dashboard_service.rs

use sqlx::PgPool;

use crate::{
    common::error::AppError, db::DashboardRepository, models::dashboard::DashboardStats,
};

#[derive(Clone)]
pub struct DashboardService {
    repo: DashboardRepository,
    pool: PgPool,
}

impl DashboardService {
    pub fn new(repo: DashboardRepository, pool: PgPool) -> Self {
        Self { repo, pool }
    }

    pub async fn get_stats(&self, user_id: i32) -> Result<DashboardStats, AppError> {
        let active_customers = self.repo.active_customers(&self.pool).await?;
        let weekly_meetings = self.repo.weekly_meetings(&self.pool).await?;
        let recent_notes = self.repo.recent_notes(&self.pool).await?;
        let pending_tasks = self.repo.pending_tasks_for_user(&self.pool, user_id).await?;
        let total_proposals = self.repo.proposals_total(&self.pool, None).await?;
        let won_proposals = self.repo.proposals_total(&self.pool, Some("approved")).await?;
        let lost_proposals = self.repo.proposals_total(&self.pool, Some("rejected")).await?;
        let monthly_customers = self.repo.monthly_customer_growth(&self.pool).await?;
        let top_customers = self.repo.top_interacted_customers(&self.pool).await?;

        Ok(DashboardStats {
            active_customers,
            weekly_meetings,
            recent_notes,
            pending_tasks,
            total_proposals,
            won_proposals,
            lost_proposals,
            monthly_customers,
            top_customers,
        })
    }
}
