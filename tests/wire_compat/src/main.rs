fn main() {
    println!("Run `cargo test -p wire-compat` to execute wire compatibility tests.");
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use saiblo_protocol::{
        AnnounceMessage, CodeVersion, CompileNotification, CompileStatus, CreateEntityRequest,
        Entity, EntityList, Game, Language, ProfileResponse,
    };

    /// Returns the path to the fixtures directory.
    fn fixtures_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
    }

    /// Loads a fixture captured from the server and parses it as `T`.
    ///
    /// Server payloads carry more fields than the uploader reads; parsing
    /// must tolerate them.
    fn parse_fixture<T: serde::de::DeserializeOwned>(name: &str) -> T {
        let path = fixtures_dir().join(name);
        let data = fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("failed to read fixture {}: {e}", path.display()));
        serde_json::from_str(&data)
            .unwrap_or_else(|e| panic!("failed to parse fixture {}: {e}", path.display()))
    }

    // --- REST responses ---

    #[test]
    fn fixture_games() {
        let games: Vec<Game> = parse_fixture("games.json");
        let foo = games.iter().find(|g| g.name == "Foo").unwrap();
        assert_eq!(foo.id, 1);
    }

    #[test]
    fn fixture_profile() {
        let profile: ProfileResponse = parse_fixture("profile.json");
        assert_eq!(profile.user.username, "alice");
    }

    #[test]
    fn fixture_entities_keep_unknown_languages() {
        let list: EntityList = parse_fixture("entities.json");
        assert_eq!(list.entities.len(), 2);
        assert_eq!(list.entities[0].language, Language::PythonZip.to_string());
        // Tags this client cannot submit must still compare as plain text.
        assert_eq!(list.entities[1].language, "java_zip");
        assert!(list.entities[1].language.parse::<Language>().is_err());
    }

    #[test]
    fn fixture_entity_created() {
        let entity: Entity = parse_fixture("entity_created.json");
        assert_eq!(entity.id, 11);
        assert_eq!(entity.repo, "https://x/q");
    }

    #[test]
    fn fixture_code_version() {
        let code: CodeVersion = parse_fixture("code_version.json");
        assert_eq!(code.version, 4);
        assert_eq!(code.remark, "abc123");
    }

    // --- Realtime frames ---

    #[test]
    fn fixture_compile_pending() {
        let note: CompileNotification = parse_fixture("compile_pending.json");
        assert_eq!(note.status(), CompileStatus::Pending("编译中".into()));
        assert!(note.token().is_none());
    }

    #[test]
    fn fixture_compile_success() {
        let note: CompileNotification = parse_fixture("compile_success.json");
        assert_eq!(note.status(), CompileStatus::Success);
        assert_eq!(note.token().as_deref(), Some("TKN1"));
    }

    #[test]
    fn fixture_compile_failure() {
        let note: CompileNotification = parse_fixture("compile_failure.json");
        assert_eq!(note.status(), CompileStatus::Failure);
        assert_eq!(
            note.compile_message.as_deref(),
            Some("syntax error on line 4")
        );
        assert!(note.token().is_none());
    }

    // --- Client payloads ---

    #[test]
    fn outgoing_payload_shapes() {
        let announce = serde_json::to_value(AnnounceMessage { entity: 9 }).unwrap();
        assert_eq!(announce, serde_json::json!({"entity": 9}));

        let create = serde_json::to_value(CreateEntityRequest {
            language: Language::Auto,
            name: "Qux".into(),
            repo: "https://x/q".into(),
        })
        .unwrap();
        assert_eq!(
            create,
            serde_json::json!({"language": "auto", "name": "Qux", "repo": "https://x/q"})
        );
    }
}
