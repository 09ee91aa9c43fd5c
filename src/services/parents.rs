//! Discovery of legal parent candidates for a subcategory.

use crate::domain::subcategory::SubCategory;
use crate::domain::types::{CategoryId, SubCategoryId};
use crate::repository::{SubCategoryListQuery, SubCategoryReader};
use crate::services::ordering::order_for_display;

use super::{ServiceError, ServiceResult};

/// Keep top-level nodes of `category_id`, minus `exclude_id`.
pub fn retain_legal_parents(
    nodes: Vec<SubCategory>,
    category_id: CategoryId,
    exclude_id: Option<SubCategoryId>,
) -> Vec<SubCategory> {
    nodes
        .into_iter()
        .filter(|node| {
            node.category_id == category_id && node.is_top_level() && Some(node.id) != exclude_id
        })
        .collect()
}

/// Returns every subcategory that may parent a node in `category_id`.
///
/// The dedicated "available parents" route is asked first. If it is missing
/// or fails for any reason, the full category listing is fetched and
/// filtered locally. Only a failure of that second lookup is reported; an
/// empty vector means the category has no top-level subcategories yet.
///
/// The two lookups run strictly one after the other and nothing is cached,
/// so the function is safe to call on every category change.
pub async fn resolve_available_parents<R>(
    repo: &R,
    category_id: CategoryId,
    exclude_id: Option<SubCategoryId>,
) -> ServiceResult<Vec<SubCategory>>
where
    R: SubCategoryReader + ?Sized,
{
    match repo.list_available_parents(category_id, exclude_id).await {
        Ok(candidates) => {
            let received = candidates.len();
            let legal = retain_legal_parents(candidates, category_id, exclude_id);
            if legal.len() != received {
                log::warn!(
                    "Dropped {} illegal parent candidates returned for category {category_id}",
                    received - legal.len()
                );
            }
            return Ok(order_for_display(&legal));
        }
        Err(e) if e.is_route_missing() => {
            log::info!("Available parents lookup absent for category {category_id}: {e}");
        }
        Err(e) => {
            log::warn!("Available parents lookup failed for category {category_id}: {e}");
        }
    }

    match repo
        .list_subcategories(SubCategoryListQuery::new(category_id))
        .await
    {
        Ok(nodes) => {
            let legal = retain_legal_parents(nodes, category_id, exclude_id);
            Ok(order_for_display(&legal))
        }
        Err(e) => {
            log::error!("Failed to list subcategories for category {category_id}: {e}");
            Err(ServiceError::Resolution(e.to_string()))
        }
    }
}
