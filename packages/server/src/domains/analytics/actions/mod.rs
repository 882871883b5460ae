use crate::common::{Actor, ApiResult, Capability};
use crate::domains::analytics::models::Dashboard;
use crate::kernel::ServerDeps;

/// Institution-wide summary; the five sections are read concurrently
pub async fn dashboard(actor: Actor, deps: &ServerDeps) -> ApiResult<Dashboard> {
    actor.can(Capability::ViewDashboard).check()?;

    let pool = &deps.db_pool;
    let (overview, recent_admissions, department_wise_students, fee_stats, hostel_occupancy) = tokio::try_join!(
        Dashboard::overview(pool),
        Dashboard::recent_admissions(pool),
        Dashboard::department_wise_students(pool),
        Dashboard::fee_stats(pool),
        Dashboard::hostel_occupancy(pool),
    )?;

    Ok(Dashboard {
        overview,
        recent_admissions,
        department_wise_students,
        fee_stats,
        hostel_occupancy,
    })
}
