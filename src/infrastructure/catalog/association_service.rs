//! Association service - maintains one directed relation between two entity collections

use std::marker::PhantomData;

use tracing::{debug, info};

use crate::domain::catalog::{CatalogEntity, CatalogStore, EntityId};
use crate::domain::relation::{Related, Relation};
use crate::domain::DomainError;

use super::catalog_service::validate_draft;

/// Add / find / replace / remove for relation `R`
///
/// Every mutation reads the owner with its collection, builds a new
/// collection and persists the owner once. Member ids are resolved one
/// lookup at a time, in the order given, before anything is written.
#[derive(Debug)]
pub struct AssociationService<R: Relation> {
    catalog: CatalogStore,
    enforce_uniqueness: bool,
    _relation: PhantomData<fn() -> R>,
}

impl<R: Relation> Clone for AssociationService<R> {
    fn clone(&self) -> Self {
        Self {
            catalog: self.catalog.clone(),
            enforce_uniqueness: self.enforce_uniqueness,
            _relation: PhantomData,
        }
    }
}

type Owned<R> = Related<<R as Relation>::Owner, <R as Relation>::Member>;

impl<R: Relation> AssociationService<R> {
    pub fn new(catalog: CatalogStore) -> Self {
        Self {
            catalog,
            enforce_uniqueness: R::ENFORCE_UNIQUENESS,
            _relation: PhantomData,
        }
    }

    /// Overrides whether `add` rejects members that are already associated
    pub fn enforce_uniqueness(mut self, enforce: bool) -> Self {
        self.enforce_uniqueness = enforce;
        self
    }

    pub fn enforces_uniqueness(&self) -> bool {
        self.enforce_uniqueness
    }

    /// Appends a member to the owner's collection
    pub async fn add(
        &self,
        owner_id: &EntityId,
        member_id: &EntityId,
    ) -> Result<Owned<R>, DomainError> {
        let member = self.find_member(member_id).await?;
        let related = self.find_owner(owner_id).await?;

        if self.enforce_uniqueness && Self::contains(&related.members, member_id) {
            return Err(DomainError::precondition_failed(
                R::MESSAGES.already_associated,
            ));
        }

        let mut members = related.members;
        members.push(member);

        let saved = self
            .catalog
            .save_related::<R>(Related::new(related.owner, members))
            .await?;

        info!(
            relation = R::FIELD,
            owner = %owner_id,
            member = %member_id,
            "Associated member"
        );
        Ok(saved)
    }

    /// Returns one member of the owner's collection
    pub async fn find_one(
        &self,
        owner_id: &EntityId,
        member_id: &EntityId,
    ) -> Result<R::Member, DomainError> {
        self.find_member(member_id).await?;
        let related = self.find_owner(owner_id).await?;

        related
            .members
            .into_iter()
            .find(|m| m.id() == member_id)
            .ok_or_else(|| DomainError::precondition_failed(R::MESSAGES.not_associated))
    }

    /// Returns the owner's whole collection, possibly empty
    pub async fn find_all_for_owner(
        &self,
        owner_id: &EntityId,
    ) -> Result<Vec<R::Member>, DomainError> {
        let related = self.find_owner(owner_id).await?;

        debug!(
            relation = R::FIELD,
            owner = %owner_id,
            count = related.members.len(),
            "Loaded associations"
        );
        Ok(related.members)
    }

    /// Substitutes the owner's collection with the given members, in order
    ///
    /// Every id must resolve; the first unknown id fails the call before
    /// anything is written.
    pub async fn replace_all(
        &self,
        owner_id: &EntityId,
        member_ids: &[EntityId],
    ) -> Result<Owned<R>, DomainError> {
        let related = self.find_owner(owner_id).await?;

        let mut members = Vec::with_capacity(member_ids.len());
        for member_id in member_ids {
            members.push(self.find_member(member_id).await?);
        }

        let saved = self
            .catalog
            .save_related::<R>(Related::new(related.owner, members))
            .await?;

        info!(
            relation = R::FIELD,
            owner = %owner_id,
            count = saved.members.len(),
            "Replaced associations"
        );
        Ok(saved)
    }

    /// Drops a member from the owner's collection
    pub async fn remove(&self, owner_id: &EntityId, member_id: &EntityId) -> Result<(), DomainError> {
        self.find_member(member_id).await?;
        let related = self.find_owner(owner_id).await?;

        if !Self::contains(&related.members, member_id) {
            return Err(DomainError::precondition_failed(R::MESSAGES.not_associated));
        }

        let members: Vec<R::Member> = related
            .members
            .into_iter()
            .filter(|m| m.id() != member_id)
            .collect();

        self.catalog
            .save_related::<R>(Related::new(related.owner, members))
            .await?;

        info!(
            relation = R::FIELD,
            owner = %owner_id,
            member = %member_id,
            "Removed association"
        );
        Ok(())
    }

    /// Creates a new member and associates it with an existing owner
    pub async fn add_new(
        &self,
        owner_id: &EntityId,
        draft: <R::Member as CatalogEntity>::Draft,
    ) -> Result<Owned<R>, DomainError> {
        if self
            .catalog
            .find_by_id::<R::Owner>(owner_id)
            .await?
            .is_none()
        {
            return Err(DomainError::not_found(R::MESSAGES.owner_not_found));
        }

        validate_draft(&draft)?;
        let member = R::Member::from_draft(EntityId::generate(), draft);
        let member = self.catalog.save(member).await?;

        self.add(owner_id, member.id()).await
    }

    async fn find_member(&self, member_id: &EntityId) -> Result<R::Member, DomainError> {
        self.catalog
            .find_by_id::<R::Member>(member_id)
            .await?
            .ok_or_else(|| DomainError::not_found(R::MESSAGES.member_not_found))
    }

    async fn find_owner(&self, owner_id: &EntityId) -> Result<Owned<R>, DomainError> {
        self.catalog
            .find_related::<R>(owner_id)
            .await?
            .ok_or_else(|| DomainError::not_found(R::MESSAGES.owner_not_found))
    }

    fn contains(members: &[R::Member], member_id: &EntityId) -> bool {
        members.iter().any(|m| m.id() == member_id)
    }
}
