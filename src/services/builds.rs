use chrono::Utc;

use crate::domain::build::{NewSavedBuild, SavedBuild};
use crate::domain::compatibility;
use crate::domain::types::{BuildId, UserId};
use crate::forms::builds::SaveBuildPayload;
use crate::repository::{BuildReader, BuildWriter, ComponentReader};

use super::{ServiceError, ServiceResult};

/// Persist a build snapshot for `user_id`.
///
/// Every referenced component must exist and the set must pass strict
/// whole-build validation; an incompatible build is blocked from being saved.
/// Totals are computed here and frozen into the record.
pub fn save_build<R>(
    payload: SaveBuildPayload,
    user_id: UserId,
    repo: &R,
) -> ServiceResult<SavedBuild>
where
    R: ComponentReader + BuildWriter,
{
    let components = repo
        .get_components_by_ids(&payload.component_ids)
        .map_err(|e| {
            log::error!("Failed to resolve components for save: {e}");
            ServiceError::Internal
        })?;

    if components.len() != payload.component_ids.len() {
        return Err(ServiceError::Form(
            "some components were not found in the catalog".to_string(),
        ));
    }

    let validation = compatibility::validate_build(&components);
    if !validation.compatible {
        return Err(ServiceError::Incompatible(validation.errors));
    }

    let new_build = NewSavedBuild {
        user_id,
        name: payload.name,
        total_price: compatibility::total_price(&components),
        total_tdp: compatibility::total_tdp(&components),
        created_at: Utc::now().naive_utc(),
    };

    let id = repo
        .create_build(&new_build, &payload.component_ids)
        .map_err(|e| {
            log::error!("Failed to save build: {e}");
            ServiceError::Internal
        })?;

    Ok(SavedBuild {
        id,
        user_id,
        name: new_build.name,
        total_price: new_build.total_price,
        total_tdp: new_build.total_tdp,
        created_at: new_build.created_at,
        components,
    })
}

/// All builds owned by `user_id`, newest first.
pub fn list_builds<R>(user_id: UserId, repo: &R) -> ServiceResult<Vec<SavedBuild>>
where
    R: BuildReader,
{
    repo.list_builds_by_user(user_id).map_err(|e| {
        log::error!("Failed to list builds: {e}");
        ServiceError::Internal
    })
}

/// One build with its components; only the owner may see it.
pub fn get_build_details<R>(
    build_id: BuildId,
    user_id: UserId,
    repo: &R,
) -> ServiceResult<SavedBuild>
where
    R: BuildReader,
{
    let build = match repo.get_build_by_id(build_id) {
        Ok(Some(build)) => build,
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get build: {e}");
            return Err(ServiceError::Internal);
        }
    };

    if build.user_id != user_id {
        return Err(ServiceError::Unauthorized);
    }

    Ok(build)
}

/// Delete a build; only the owner may remove it.
pub fn delete_build<R>(build_id: BuildId, user_id: UserId, repo: &R) -> ServiceResult<()>
where
    R: BuildReader + BuildWriter,
{
    let build = match repo.get_build_by_id(build_id) {
        Ok(Some(build)) => build,
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get build: {e}");
            return Err(ServiceError::Internal);
        }
    };

    if build.user_id != user_id {
        return Err(ServiceError::Unauthorized);
    }

    match repo.delete_build(build_id, user_id) {
        Ok(_) => Ok(()),
        Err(e) => {
            log::error!("Failed to delete build: {e}");
            Err(ServiceError::Internal)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::component::{Component, ComponentSpecs};
    use crate::domain::types::{
        BuildName, CategoryId, CategorySlug, ComponentId, ComponentName, ComponentPrice, RamType,
        Socket, Watts,
    };
    use crate::repository::test::TestRepository;

    fn component(id: i32, category: CategorySlug, price: f64) -> Component {
        Component {
            id: ComponentId::new(id).unwrap(),
            category_id: CategoryId::new(1).unwrap(),
            category,
            name: ComponentName::new(format!("component-{id}")).unwrap(),
            price: ComponentPrice::new(price).unwrap(),
            image: None,
            socket: None,
            ram_type: None,
            tdp: None,
            psu_wattage: None,
            specs: ComponentSpecs::default(),
        }
    }

    fn catalog() -> Vec<Component> {
        let mut cpu = component(1, CategorySlug::Cpu, 9_000.0);
        cpu.socket = Some(Socket::new("AM5").unwrap());
        cpu.tdp = Some(Watts::new(105).unwrap());

        let mut mb = component(2, CategorySlug::Motherboard, 4_500.0);
        mb.socket = Some(Socket::new("AM5").unwrap());
        mb.ram_type = Some(RamType::new("DDR5").unwrap());

        let mut mb_other = component(3, CategorySlug::Motherboard, 2_500.0);
        mb_other.socket = Some(Socket::new("AM4").unwrap());
        mb_other.ram_type = Some(RamType::new("DDR4").unwrap());

        let mut psu = component(4, CategorySlug::Psu, 2_500.0);
        psu.psu_wattage = Some(Watts::new(650).unwrap());

        vec![cpu, mb, mb_other, psu]
    }

    fn payload(ids: &[i32]) -> SaveBuildPayload {
        SaveBuildPayload {
            name: BuildName::new("My rig").unwrap(),
            component_ids: ids
                .iter()
                .map(|id| ComponentId::new(*id).unwrap())
                .collect(),
        }
    }

    fn owner() -> UserId {
        UserId::new(1).unwrap()
    }

    #[test]
    fn saves_a_compatible_build_with_frozen_totals() {
        let repo = TestRepository::new(catalog());

        let build = save_build(payload(&[1, 2, 4]), owner(), &repo).unwrap();

        assert_eq!(build.total_price, 16_000.0);
        assert_eq!(build.total_tdp, 105);
        assert_eq!(build.components.len(), 3);

        let reloaded = get_build_details(build.id, owner(), &repo).unwrap();
        assert_eq!(reloaded.name.as_str(), "My rig");
        assert_eq!(reloaded.total_price, 16_000.0);
    }

    #[test]
    fn refuses_to_save_an_incompatible_build() {
        let repo = TestRepository::new(catalog());

        let err = save_build(payload(&[1, 3]), owner(), &repo).unwrap_err();

        match err {
            ServiceError::Incompatible(errors) => {
                assert_eq!(errors.len(), 1);
                assert!(errors[0].contains("AM4"));
            }
            other => panic!("expected Incompatible, got {other:?}"),
        }
    }

    #[test]
    fn refuses_to_save_unknown_components() {
        let repo = TestRepository::new(catalog());

        let err = save_build(payload(&[1, 999]), owner(), &repo).unwrap_err();
        assert!(matches!(err, ServiceError::Form(_)));
    }

    #[test]
    fn details_are_owner_scoped() {
        let repo = TestRepository::new(catalog());
        let build = save_build(payload(&[1, 2]), owner(), &repo).unwrap();

        let stranger = UserId::new(2).unwrap();
        let err = get_build_details(build.id, stranger, &repo).unwrap_err();
        assert_eq!(err, ServiceError::Unauthorized);

        let missing = BuildId::new(99).unwrap();
        let err = get_build_details(missing, owner(), &repo).unwrap_err();
        assert_eq!(err, ServiceError::NotFound);
    }

    #[test]
    fn delete_is_owner_scoped() {
        let repo = TestRepository::new(catalog());
        let build = save_build(payload(&[1, 2]), owner(), &repo).unwrap();

        let stranger = UserId::new(2).unwrap();
        assert_eq!(
            delete_build(build.id, stranger, &repo).unwrap_err(),
            ServiceError::Unauthorized
        );

        delete_build(build.id, owner(), &repo).unwrap();
        assert!(list_builds(owner(), &repo).unwrap().is_empty());
    }

    #[test]
    fn lists_builds_newest_first() {
        let repo = TestRepository::new(catalog());
        let first = save_build(payload(&[1]), owner(), &repo).unwrap();
        let second = save_build(payload(&[2]), owner(), &repo).unwrap();

        let builds = list_builds(owner(), &repo).unwrap();
        assert_eq!(builds.len(), 2);
        assert_eq!(builds[0].id, second.id);
        assert_eq!(builds[1].id, first.id);
    }
}
