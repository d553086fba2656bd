// ABOUTME: Tests for the persisted configuration map.
// ABOUTME: Covers add/remove semantics, YAML round-trips, and default omission.

use stevedore::config::{BuildSpec, Config, ImageConfig};
use stevedore::error::Error;

#[test]
fn add_image_defaults_to_docker_build() {
    let mut config = Config::default();
    config
        .add_image("default", "alice/app", None, None, None, None)
        .unwrap();

    let entry = &config.images["default"];
    assert_eq!(entry.image, "alice/app");
    assert!(entry.build.is_default());
    assert!(entry.tags.is_empty());
}

#[test]
fn add_image_accepts_explicit_docker_builder() {
    let mut config = Config::default();
    config
        .add_image("default", "alice/app", None, None, None, Some("docker"))
        .unwrap();
    assert!(config.images["default"].build.is_default());
}

#[test]
fn add_image_accepts_kaniko_builder() {
    let mut config = Config::default();
    config
        .add_image("default", "alice/app", None, None, None, Some("kaniko"))
        .unwrap();
    assert_eq!(config.images["default"].build, BuildSpec::Kaniko);
}

#[test]
fn add_image_rejects_unknown_builder() {
    let mut config = Config::default();
    let err = config
        .add_image("default", "alice/app", None, None, None, Some("buildah"))
        .unwrap_err();
    assert!(matches!(err, Error::UnknownBuilder(name) if name == "buildah"));
    assert!(config.images.is_empty());
}

#[test]
fn add_image_records_tag_and_paths() {
    let mut config = Config::default();
    config
        .add_image(
            "web",
            "alice/web",
            Some("v1"),
            Some("./web"),
            Some("./web/Dockerfile"),
            None,
        )
        .unwrap();

    let entry = &config.images["web"];
    assert_eq!(entry.tags, vec!["v1".to_string()]);
    assert_eq!(entry.context.as_deref(), Some("./web"));
    assert_eq!(entry.dockerfile.as_deref(), Some("./web/Dockerfile"));
}

#[test]
fn add_image_replaces_an_existing_key() {
    let mut config = Config::default();
    config
        .add_image("default", "old/app", None, None, None, None)
        .unwrap();
    config
        .add_image("default", "new/app", None, None, None, None)
        .unwrap();

    assert_eq!(config.images.len(), 1);
    assert_eq!(config.images["default"].image, "new/app");
}

#[test]
fn remove_images_requires_keys_or_all() {
    let mut config = Config::default();
    let err = config.remove_images(false, &[]).unwrap_err();
    assert!(matches!(err, Error::NoImagesSpecified));
}

#[test]
fn remove_images_by_key() {
    let mut config = Config::default();
    config
        .add_image("web", "alice/web", None, None, None, None)
        .unwrap();
    config
        .add_image("api", "alice/api", None, None, None, None)
        .unwrap();

    config.remove_images(false, &["web".to_string()]).unwrap();
    assert_eq!(config.images.len(), 1);
    assert!(config.images.contains_key("api"));
}

#[test]
fn remove_all_images() {
    let mut config = Config::default();
    config
        .add_image("web", "alice/web", None, None, None, None)
        .unwrap();

    config.remove_images(true, &[]).unwrap();
    assert!(config.images.is_empty());
}

#[test]
fn yaml_round_trip_preserves_the_config() {
    let mut config = Config::default();
    config
        .add_image("default", "alice/app", Some("v1"), None, None, Some("kaniko"))
        .unwrap();

    let yaml = serde_yaml::to_string(&config).unwrap();
    let restored = Config::from_yaml(&yaml).unwrap();
    assert_eq!(restored, config);
}

#[test]
fn convention_defaults_are_omitted_from_yaml() {
    let mut entry = ImageConfig::new("alice/app");
    entry.tags = vec!["v1".to_string()];

    let yaml = serde_yaml::to_string(&entry).unwrap();
    assert!(yaml.contains("image: alice/app"));
    assert!(yaml.contains("v1"));
    assert!(!yaml.contains("dockerfile"));
    assert!(!yaml.contains("context"));
    assert!(!yaml.contains("build"));
    assert!(!yaml.contains("createPullSecret"));
}

#[test]
fn skip_push_flag_survives_serialization() {
    let mut entry = ImageConfig::new("stevedore");
    entry.build = BuildSpec::Docker {
        target: None,
        skip_push: true,
    };

    let yaml = serde_yaml::to_string(&entry).unwrap();
    assert!(yaml.contains("skipPush: true"));

    let restored: ImageConfig = serde_yaml::from_str(&yaml).unwrap();
    assert!(restored.build.skips_push());
}

#[test]
fn missing_fields_deserialize_to_defaults() {
    let entry: ImageConfig = serde_yaml::from_str("image: alice/app\n").unwrap();

    assert_eq!(entry.image, "alice/app");
    assert!(entry.tags.is_empty());
    assert!(entry.build.is_default());
    assert!(!entry.create_pull_secret);
    assert!(entry.append_dockerfile_instructions.is_empty());
}
