//! Link lifecycle: creation, lookup, partial update, deletion and listing.

use std::sync::Arc;

use serde_json::json;

use crate::application::services::TokenService;
use crate::domain::entities::{Link, LinkPatch, NewLink};
use crate::domain::pagination::{Filters, Metadata, calculate_metadata};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::link_validation::{canonical_destination, validate_link};

/// Service for managing links.
///
/// Fields are validated before any repository write.
pub struct LinkService<L: LinkRepository> {
    link_repository: Arc<L>,
    token_service: Arc<TokenService<L>>,
}

impl<L: LinkRepository> LinkService<L> {
    /// Creates a new link service.
    pub fn new(link_repository: Arc<L>, token_service: Arc<TokenService<L>>) -> Self {
        Self {
            link_repository,
            token_service,
        }
    }

    /// Creates a link, generating a token when none is supplied.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if a field is invalid.
    /// Returns [`AppError::Conflict`] if the supplied token is already in use.
    /// Returns [`AppError::Internal`] if no free token could be generated or on
    /// database errors.
    pub async fn create_link(
        &self,
        name: String,
        destination: String,
        token: Option<String>,
    ) -> Result<Link, AppError> {
        validate_link(&name, &destination, token.as_deref())?;
        let destination = canonical_destination(&destination)?;

        let token = match token {
            Some(token) => {
                self.ensure_token_available(&token).await?;
                token
            }
            None => self.token_service.generate_unique_token().await?,
        };

        let link = self
            .link_repository
            .create(NewLink {
                name,
                destination,
                token,
            })
            .await?;

        tracing::info!(link_id = link.id, token = %link.token, "link created");

        Ok(link)
    }

    /// Retrieves a link by ID.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the link does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn get_link(&self, id: i64) -> Result<Link, AppError> {
        self.link_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Link not found", json!({ "id": id })))
    }

    /// Retrieves a link by its redirect token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link uses the token.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn get_link_by_token(&self, token: &str) -> Result<Link, AppError> {
        self.link_repository
            .find_by_token(token)
            .await?
            .ok_or_else(|| AppError::not_found("Link not found", json!({ "token": token })))
    }

    /// Applies `patch` on top of a fresh read and writes it back conditionally.
    ///
    /// When `expected_version` is given it must match the stored version.
    /// Absent fields keep their stored value. An empty patch still bumps the
    /// version.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the link does not exist.
    /// Returns [`AppError::EditConflict`] if the version moved, either before
    /// the read (`expected_version`) or between the read and the write.
    /// Returns [`AppError::Validation`] if the patched link is invalid.
    /// Returns [`AppError::Conflict`] if the new token is already in use.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn update_link(
        &self,
        id: i64,
        patch: LinkPatch,
        expected_version: Option<i32>,
    ) -> Result<Link, AppError> {
        let mut link = self.get_link(id).await?;

        if let Some(expected) = expected_version
            && expected != link.version
        {
            return Err(AppError::edit_conflict(json!({
                "id": id,
                "expected_version": expected,
                "current_version": link.version,
            })));
        }

        let token_changed = patch
            .token
            .as_deref()
            .is_some_and(|token| token != link.token);

        link.apply(patch);
        validate_link(&link.name, &link.destination, Some(&link.token))?;
        link.destination = canonical_destination(&link.destination)?;

        if token_changed {
            self.ensure_token_available(&link.token).await?;
        }

        let updated = self.link_repository.update(&link).await?;

        tracing::info!(link_id = id, version = updated.version, "link updated");

        Ok(updated)
    }

    /// Deletes a link together with its visits.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the link does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn delete_link(&self, id: i64) -> Result<(), AppError> {
        if !self.link_repository.delete(id).await? {
            return Err(AppError::not_found("Link not found", json!({ "id": id })));
        }

        tracing::info!(link_id = id, "link deleted");

        Ok(())
    }

    /// Lists links whose name matches `name`, one page at a time.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the filters are out of range or the
    /// sort key is not allow-listed.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn list_links(
        &self,
        name: &str,
        filters: &Filters,
    ) -> Result<(Vec<Link>, Metadata), AppError> {
        let page = filters.validate()?;

        let (links, total) = self.link_repository.list(name, &page).await?;
        let metadata = calculate_metadata(total, filters.page, filters.page_size);

        Ok((links, metadata))
    }

    async fn ensure_token_available(&self, token: &str) -> Result<(), AppError> {
        if self.link_repository.find_by_token(token).await?.is_some() {
            return Err(AppError::conflict(
                "A link with this token already exists",
                json!({ "field": "token", "token": token }),
            ));
        }

        Ok(())
    }
}
