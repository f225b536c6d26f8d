//! Sample data for an empty database.

use mousespa_types::domain::order::OrderSubmission;
use mousespa_types::ports::order_repository::{OrderRepository, RepoError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The table already had rows; nothing was inserted.
    Skipped { existing: u64 },
    Seeded {
        inserted: usize,
        failed: usize,
        total: u64,
    },
}

#[allow(clippy::too_many_arguments)]
fn sample(
    full_name: &str,
    phone_number: &str,
    email: &str,
    services: &[&str],
    item_count: i32,
    pickup_method: &str,
    pickup_address: &str,
    additional_notes: &str,
) -> OrderSubmission {
    OrderSubmission {
        full_name: full_name.into(),
        phone_number: phone_number.into(),
        email: email.into(),
        services: services.iter().map(|s| s.to_string()).collect(),
        item_count,
        pickup_method: pickup_method.into(),
        pickup_address: Some(pickup_address.into()),
        additional_notes: Some(additional_notes.into()),
    }
}

pub fn sample_orders() -> Vec<OrderSubmission> {
    vec![
        sample(
            "Budi Santoso",
            "081234567890",
            "budi.santoso@gmail.com",
            &["Deep Clean", "Anti-bacterial"],
            2,
            "pickup",
            "Jl. Sudirman No. 123, Jakarta Selatan",
            "Mousepad gaming ukuran XL",
        ),
        sample(
            "Siti Rahayu",
            "087654321098",
            "siti.rahayu@yahoo.com",
            &["Standard Clean"],
            1,
            "drop_off",
            "",
            "",
        ),
        sample(
            "Ahmad Wijaya",
            "082112345678",
            "ahmad.wijaya@outlook.com",
            &["Deep Clean", "Stain Removal", "Deodorizer"],
            3,
            "pickup",
            "Jl. Gatot Subroto No. 456, Bandung",
            "Ada noda kopi yang membandel",
        ),
        sample(
            "Dewi Lestari",
            "089876543210",
            "dewi.lestari@gmail.com",
            &["Express Clean"],
            1,
            "cod",
            "Jl. Diponegoro No. 789, Surabaya",
            "Butuh cepat, maksimal 2 hari",
        ),
        sample(
            "Reza Pratama",
            "081398765432",
            "reza.pratama@hotmail.com",
            &["Deep Clean", "Anti-bacterial", "UV Sanitization"],
            5,
            "pickup",
            "Jl. Thamrin No. 321, Jakarta Pusat",
            "Untuk warnet, perlu invoice",
        ),
    ]
}

/// Inserts [`sample_orders`] when the table is empty. A failed insert is
/// logged and the remaining samples are still attempted.
pub async fn seed_orders<R: OrderRepository>(repo: &R) -> Result<SeedOutcome, RepoError> {
    let existing = repo.count().await?;
    if existing > 0 {
        tracing::info!(existing, "database already has orders, skipping seed");
        return Ok(SeedOutcome::Skipped { existing });
    }

    tracing::info!("seeding database");
    let mut inserted = 0;
    let mut failed = 0;
    for submission in sample_orders() {
        let name = submission.full_name.clone();
        let email = submission.email.clone();
        let draft = match submission.into_new_order() {
            Ok(d) => d,
            Err(e) => {
                tracing::error!(%name, error = %e, "invalid sample order");
                failed += 1;
                continue;
            }
        };
        match repo.create(draft).await {
            Ok(order) => {
                tracing::info!(order_id = order.id, %name, %email, "sample order created");
                inserted += 1;
            }
            Err(e) => {
                tracing::error!(%name, error = %e, "failed to insert sample order");
                failed += 1;
            }
        }
    }

    let total = repo.count().await?;
    tracing::info!(inserted, failed, total, "seeding finished");
    Ok(SeedOutcome::Seeded {
        inserted,
        failed,
        total,
    })
}
