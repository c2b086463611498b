use photoshare_models::{
    AlbumSearchRow, Comment, NewPhoto, Photo, SessionPayload, StorageRemoveRequest, UserMetadata,
};

#[test]
fn feed_page_decodes_in_server_order() {
    let body = r#"[
        {
            "id": "b",
            "user_id": "u2",
            "path": "b.jpg",
            "description": "second",
            "created_at": "2024-05-02T09:30:00.123456+00:00",
            "album_id": null,
            "profiles": { "display_name": "bob" },
            "albums": null
        },
        {
            "id": "a",
            "user_id": "u1",
            "path": "a.jpg",
            "description": "first",
            "created_at": "2024-05-01T09:30:00+00:00",
            "album_id": 1,
            "profiles": { "display_name": "ann" },
            "albums": { "name": "Trips" }
        }
    ]"#;
    let photos: Vec<Photo> = serde_json::from_str(body).expect("page");
    let ids: Vec<&str> = photos.iter().map(|photo| photo.id.as_str()).collect();
    assert_eq!(ids, ["b", "a"]);
    assert!(photos[0].created_at > photos[1].created_at);
    assert_eq!(photos[1].album_name(), Some("Trips"));
}

#[test]
fn comment_insert_response_carries_author() {
    let body = r#"[{
        "id": "c1",
        "photo_id": "p1",
        "user_id": "u1",
        "text": "nice",
        "created_at": "2024-05-01T10:00:00Z",
        "profiles": { "display_name": "ann" }
    }]"#;
    let rows: Vec<Comment> = serde_json::from_str(body).expect("comment");
    assert_eq!(rows[0].author_name(), Some("ann"));
}

#[test]
fn album_search_row_without_embeds_defaults_to_empty() {
    let row: AlbumSearchRow =
        serde_json::from_str(r#"{ "id": 9, "name": "Beach", "user_id": "u3" }"#).expect("row");
    assert_eq!(row.photo_count(), 0);
    assert!(row.preview_paths().is_empty());
}

#[test]
fn insert_payloads_serialize_expected_columns() {
    let photo = NewPhoto {
        user_id: "u1".into(),
        description: "hello".into(),
        path: Some("abc.png".into()),
        album_id: None,
    };
    assert_eq!(
        serde_json::to_value(&photo).expect("json"),
        serde_json::json!({
            "user_id": "u1",
            "description": "hello",
            "path": "abc.png",
            "album_id": null
        })
    );

    let remove = StorageRemoveRequest {
        prefixes: vec!["u1/abc.png".into()],
    };
    assert_eq!(
        serde_json::to_string(&remove).expect("json"),
        r#"{"prefixes":["u1/abc.png"]}"#
    );
}

#[test]
fn session_payload_round_trips_through_local_storage_shape() {
    let body = r#"{
        "access_token": "token",
        "token_type": "bearer",
        "refresh_token": "refresh",
        "expires_in": 3600,
        "expires_at": 1714557600,
        "user": { "id": "u1", "email": "ann@example.com", "user_metadata": { "display_name": "ann" } }
    }"#;
    let session: SessionPayload = serde_json::from_str(body).expect("session");
    assert_eq!(session.expires_at, Some(1_714_557_600));
    let stored = serde_json::to_string(&session).expect("encode");
    let restored: SessionPayload = serde_json::from_str(&stored).expect("decode");
    assert_eq!(restored, session);
    assert_eq!(
        restored.user.user_metadata,
        UserMetadata {
            display_name: Some("ann".into())
        }
    );
}
