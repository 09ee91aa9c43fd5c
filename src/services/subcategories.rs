use crate::domain::hierarchy::validate_placement;
use crate::domain::subcategory::{NewSubCategory, SubCategory};
use crate::domain::types::{CategoryId, SubCategoryId};
use crate::dto::subcategories::SubCategoryDto;
use crate::forms::subcategories::{AddSubCategoryFormPayload, UpdateSubCategoryFormPayload};
use crate::repository::{
    RepositoryError, SubCategoryListQuery, SubCategoryReader, SubCategoryWriter,
};
use crate::services::ordering::{find_orphans, order_for_display};
use crate::services::reconcile::{classify_write_conflict, reconcile};

use super::{ServiceError, ServiceResult};

async fn fetch_snapshot<R>(repo: &R, category_id: CategoryId) -> ServiceResult<Vec<SubCategory>>
where
    R: SubCategoryReader + ?Sized,
{
    repo.list_subcategories(SubCategoryListQuery::new(category_id))
        .await
        .map_err(|e| {
            log::error!("Failed to list subcategories for category {category_id}: {e}");
            ServiceError::Resolution(e.to_string())
        })
}

/// Lists a category's subcategories as display rows.
///
/// Rows follow [`order_for_display`]. Nested rows whose parent is missing
/// from the listing are logged and kept, flagged as orphaned.
pub async fn show_subcategories<R>(
    category_id: CategoryId,
    repo: &R,
) -> ServiceResult<Vec<SubCategoryDto>>
where
    R: SubCategoryReader + ?Sized,
{
    let snapshot = fetch_snapshot(repo, category_id).await?;

    for warning in find_orphans(&snapshot) {
        log::warn!(
            "Subcategory {} references missing parent {}",
            warning.node,
            warning.missing_parent
        );
    }

    Ok(SubCategoryDto::rows(&order_for_display(&snapshot)))
}

/// Builds the display row of a node that was just written, resolving its
/// parent against a fresh listing of the category.
pub async fn describe_subcategory<R>(
    subcategory: &SubCategory,
    repo: &R,
) -> ServiceResult<SubCategoryDto>
where
    R: SubCategoryReader + ?Sized,
{
    let snapshot = fetch_snapshot(repo, subcategory.category_id).await?;
    Ok(SubCategoryDto::row_within(&snapshot, subcategory))
}

/// Which write a submission performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Submission {
    Create,
    Update(SubCategoryId),
}

impl Submission {
    fn editing(self) -> Option<SubCategoryId> {
        match self {
            Self::Create => None,
            Self::Update(id) => Some(id),
        }
    }
}

/// Validate against a fresh snapshot, submit, then repair the echo.
async fn submit<R>(
    repo: &R,
    draft: &NewSubCategory,
    submission: Submission,
) -> ServiceResult<SubCategory>
where
    R: SubCategoryReader + SubCategoryWriter + ?Sized,
{
    let snapshot = fetch_snapshot(repo, draft.category_id).await?;
    let editing = submission.editing();

    if editing.is_some_and(|id| !snapshot.iter().any(|node| node.id == id)) {
        return Err(ServiceError::NotFound);
    }

    if let Err(violation) = validate_placement(&snapshot, draft, editing) {
        log::info!("Rejected subcategory placement: {violation}");
        return Err(violation.into());
    }

    let written = match submission {
        Submission::Create => repo.create_subcategory(draft).await,
        Submission::Update(id) => repo.update_subcategory(id, draft).await,
    };

    match written {
        Ok(written) => Ok(reconcile(written, draft.parent_id)),
        Err(RepositoryError::Conflict(message)) => Err(ServiceError::Conflict(
            classify_write_conflict(&message, draft.parent_id),
        )),
        Err(RepositoryError::Status { status: 404, .. }) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to write subcategory: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Creates a subcategory, top-level or nested, and returns it with its
/// parent linkage filled in.
pub async fn create_subcategory<R>(
    payload: AddSubCategoryFormPayload,
    repo: &R,
) -> ServiceResult<SubCategory>
where
    R: SubCategoryReader + SubCategoryWriter + ?Sized,
{
    submit(repo, &payload.subcategory, Submission::Create).await
}

/// Updates a subcategory, possibly promoting it to top-level or nesting it
/// under another top-level node of the same category.
///
/// The node must already belong to the payload's category.
pub async fn update_subcategory<R>(
    payload: UpdateSubCategoryFormPayload,
    repo: &R,
) -> ServiceResult<SubCategory>
where
    R: SubCategoryReader + SubCategoryWriter + ?Sized,
{
    let submission = Submission::Update(payload.subcategory_id);
    submit(repo, &payload.subcategory, submission).await
}
