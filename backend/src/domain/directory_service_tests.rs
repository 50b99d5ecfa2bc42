//! Tests for the directory service.

use std::sync::Arc;

use super::*;
use crate::domain::ports::{MockDirectoryLookup, MockDirectoryRepository};
use crate::domain::{
    CardUid, DeviceId, ErrorCode, LocationId, Login, MacAddress, ProfileUpdate, RoleId, UserId,
    WalletAddress,
};

fn login(raw: &str) -> Login {
    Login::new(raw).expect("valid login")
}

fn uid(raw: &str) -> CardUid {
    CardUid::new(raw).expect("valid uid")
}

fn profile(id: i32, name: &str, card: Option<&str>) -> UserProfile {
    UserProfile {
        id: UserId::new(id),
        login: login(name),
        uid: card.map(uid),
        wallet: None,
    }
}

fn make_service(
    directory: MockDirectoryRepository,
    lookup: MockDirectoryLookup,
) -> DirectoryService<MockDirectoryRepository, MockDirectoryLookup> {
    DirectoryService::new(Arc::new(directory), Arc::new(lookup))
}

#[tokio::test]
async fn register_users_upserts_in_one_call() {
    let mut directory = MockDirectoryRepository::new();
    directory
        .expect_upsert_users()
        .withf(|drafts| drafts.len() == 2)
        .times(1)
        .return_once(|_| Ok(vec![profile(1, "alice", None), profile(2, "bob", Some("04AA"))]));

    let stored = make_service(directory, MockDirectoryLookup::new())
        .register_users(RegisterUsersRequest {
            users: vec![
                UserDraft::new(login("alice")),
                UserDraft {
                    login: login("bob"),
                    uid: Some(uid("04AA")),
                    wallet: None,
                },
            ],
        })
        .await
        .expect("upsert succeeds");

    assert_eq!(stored.len(), 2);
}

#[tokio::test]
async fn register_users_rejects_empty_list() {
    let err = make_service(MockDirectoryRepository::new(), MockDirectoryLookup::new())
        .register_users(RegisterUsersRequest::default())
        .await
        .expect_err("empty list");

    assert_eq!(err.code(), ErrorCode::InvalidRequest);
}

#[tokio::test]
async fn edit_user_with_taken_uid_is_already_exists() {
    let mut directory = MockDirectoryRepository::new();
    directory
        .expect_update_user_profile()
        .times(1)
        .return_once(|_, _| Err(DirectoryRepositoryError::duplicate("users_uid_key")));

    let err = make_service(directory, MockDirectoryLookup::new())
        .edit_user(EditUserRequest {
            login: login("alice"),
            update: ProfileUpdate {
                uid: Some(uid("04AA")),
                wallet: None,
            },
        })
        .await
        .expect_err("uid taken");

    assert_eq!(err.code(), ErrorCode::AlreadyExists);
}

#[tokio::test]
async fn edit_user_requires_a_field() {
    let mut directory = MockDirectoryRepository::new();
    directory.expect_update_user_profile().never();

    let err = make_service(directory, MockDirectoryLookup::new())
        .edit_user(EditUserRequest {
            login: login("alice"),
            update: ProfileUpdate::default(),
        })
        .await
        .expect_err("empty update");

    assert_eq!(err.code(), ErrorCode::InvalidRequest);
}

#[tokio::test]
async fn edit_unknown_user_is_not_found() {
    let mut directory = MockDirectoryRepository::new();
    directory
        .expect_update_user_profile()
        .times(1)
        .return_once(|_, _| Err(DirectoryRepositoryError::user_not_found("ghost")));

    let err = make_service(directory, MockDirectoryLookup::new())
        .edit_user(EditUserRequest {
            login: login("ghost"),
            update: ProfileUpdate {
                uid: None,
                wallet: Some(WalletAddress::new("0xabc").expect("valid wallet")),
            },
        })
        .await
        .expect_err("unknown login");

    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn link_uid_creates_unknown_member() {
    let mut directory = MockDirectoryRepository::new();
    directory
        .expect_find_user_by_login()
        .times(1)
        .return_once(|_| Ok(None));
    directory
        .expect_create_user()
        .withf(|draft| draft.login.as_str() == "carol" && draft.uid.is_some())
        .times(1)
        .return_once(|_| Ok(profile(3, "carol", Some("04CC"))));
    directory.expect_assign_uid().never();

    let linked = make_service(directory, MockDirectoryLookup::new())
        .link_uid(LinkUidRequest {
            login: login("carol"),
            uid: uid("04CC"),
        })
        .await
        .expect("member created");

    assert_eq!(linked.uid, Some(uid("04CC")));
}

#[tokio::test]
async fn link_uid_assigns_to_member_without_card() {
    let mut directory = MockDirectoryRepository::new();
    directory
        .expect_find_user_by_login()
        .times(1)
        .return_once(|_| Ok(Some(profile(1, "alice", None))));
    directory
        .expect_assign_uid()
        .times(1)
        .return_once(|_, _| Ok(profile(1, "alice", Some("04AA"))));
    directory.expect_create_user().never();

    let linked = make_service(directory, MockDirectoryLookup::new())
        .link_uid(LinkUidRequest {
            login: login("alice"),
            uid: uid("04AA"),
        })
        .await
        .expect("card linked");

    assert_eq!(linked.id, UserId::new(1));
}

#[tokio::test]
async fn link_uid_refuses_to_replace_a_card() {
    let mut directory = MockDirectoryRepository::new();
    directory
        .expect_find_user_by_login()
        .times(1)
        .return_once(|_| Ok(Some(profile(1, "alice", Some("04AA")))));
    directory.expect_assign_uid().never();

    let err = make_service(directory, MockDirectoryLookup::new())
        .link_uid(LinkUidRequest {
            login: login("alice"),
            uid: uid("04BB"),
        })
        .await
        .expect_err("card already linked");

    assert_eq!(err.code(), ErrorCode::AlreadyExists);
}

#[tokio::test]
async fn create_role_duplicate_is_already_exists() {
    let mut directory = MockDirectoryRepository::new();
    directory
        .expect_create_role()
        .times(1)
        .return_once(|_| Err(DirectoryRepositoryError::duplicate("roles_name_key")));

    let err = make_service(directory, MockDirectoryLookup::new())
        .create_role(RoleName::new("cleaning").expect("valid role"))
        .await
        .expect_err("duplicate role");

    assert_eq!(err.code(), ErrorCode::AlreadyExists);
}

#[tokio::test]
async fn register_device_resolves_role_and_location() {
    let mut lookup = MockDirectoryLookup::new();
    lookup
        .expect_resolve_role()
        .times(1)
        .return_once(|_| Ok(Some(RoleId::new(2))));
    lookup
        .expect_resolve_location()
        .times(1)
        .return_once(|_| Ok(Some(LocationId::new(5))));
    let mut directory = MockDirectoryRepository::new();
    directory
        .expect_create_device()
        .withf(|_, role, location| *role == RoleId::new(2) && *location == LocationId::new(5))
        .times(1)
        .return_once(|_, _, _| Ok(DeviceId::new(8)));

    let device = make_service(directory, lookup)
        .register_device(RegisterDeviceRequest {
            mac: MacAddress::new("aa:bb:cc:dd:ee:ff").expect("valid mac"),
            role: RoleName::new("cleaning").expect("valid role"),
            location: LocationName::new("lobby").expect("valid location"),
        })
        .await
        .expect("device registered");

    assert_eq!(device.id, DeviceId::new(8));
    assert_eq!(device.location.name.as_str(), "lobby");
}

#[tokio::test]
async fn register_device_with_unknown_role_writes_nothing() {
    let mut lookup = MockDirectoryLookup::new();
    lookup.expect_resolve_role().return_once(|_| Ok(None));
    let mut directory = MockDirectoryRepository::new();
    directory.expect_create_device().never();

    let err = make_service(directory, lookup)
        .register_device(RegisterDeviceRequest {
            mac: MacAddress::new("aa:bb:cc:dd:ee:ff").expect("valid mac"),
            role: RoleName::new("security").expect("valid role"),
            location: LocationName::new("lobby").expect("valid location"),
        })
        .await
        .expect_err("unknown role");

    assert_eq!(err.code(), ErrorCode::NotFound);
}
