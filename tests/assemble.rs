// ABOUTME: Tests for the final image configuration assembly.
// ABOUTME: Covers the skip-push override and convention-default omissions.

use stevedore::config::{BuildSpec, NO_REGISTRY_IMAGE};
use stevedore::resolve::{RegistryChoice, ResolvedImage, assemble};
use stevedore::types::{ImageName, ParsedImage};

fn resolved(choice: RegistryChoice, repository: Option<&str>) -> ResolvedImage {
    ResolvedImage {
        parsed: ParsedImage::split("app", true),
        choice,
        repository: repository.map(|r| ImageName::normalize(r).unwrap()),
        target: None,
        dockerfile: "./Dockerfile".to_string(),
        context: "./".to_string(),
    }
}

#[test]
fn skip_push_forces_placeholder_and_flag() {
    // Even a confirmed repository loses to the skip-push choice.
    let config = assemble(resolved(
        RegistryChoice::SkipPush,
        Some("alice/app"),
    ));

    assert_eq!(config.image, NO_REGISTRY_IMAGE);
    assert!(config.build.skips_push());
}

#[test]
fn confirmed_repository_becomes_the_image() {
    let config = assemble(resolved(RegistryChoice::UseHub, Some("alice/app")));

    assert_eq!(config.image, "alice/app");
    assert!(!config.build.skips_push());
}

#[test]
fn tag_from_the_parsed_reference_is_carried() {
    let mut input = resolved(RegistryChoice::UseHub, Some("alice/app"));
    input.parsed = ParsedImage::split("app:v2", true);

    let config = assemble(input);
    assert_eq!(config.tags, vec!["v2".to_string()]);
}

#[test]
fn untagged_build_carries_no_tags() {
    let config = assemble(resolved(RegistryChoice::UseHub, Some("alice/app")));
    assert!(config.tags.is_empty());
}

#[test]
fn selected_target_lands_in_the_build_spec() {
    let mut input = resolved(RegistryChoice::UseHub, Some("alice/app"));
    input.target = Some("builder".to_string());

    let config = assemble(input);
    assert_eq!(config.build.target(), Some("builder"));
}

#[test]
fn full_dockerfile_build_is_the_convention_default() {
    let config = assemble(resolved(RegistryChoice::UseHub, Some("alice/app")));

    assert_eq!(
        config.build,
        BuildSpec::Docker {
            target: None,
            skip_push: false,
        }
    );
    assert!(config.build.is_default());
}

#[test]
fn conventional_paths_are_omitted() {
    let config = assemble(resolved(RegistryChoice::UseHub, Some("alice/app")));
    assert_eq!(config.dockerfile, None);
    assert_eq!(config.context, None);
}

#[test]
fn divergent_paths_are_recorded() {
    let mut input = resolved(
        RegistryChoice::UseOther("quay.io".to_string()),
        Some("quay.io/alice/app"),
    );
    input.dockerfile = "./docker/Dockerfile.dev".to_string();
    input.context = "./docker".to_string();

    let config = assemble(input);
    assert_eq!(config.dockerfile.as_deref(), Some("./docker/Dockerfile.dev"));
    assert_eq!(config.context.as_deref(), Some("./docker"));
}

#[test]
fn development_helpers_are_enabled() {
    let config = assemble(resolved(RegistryChoice::UseHub, Some("alice/app")));

    assert!(config.inject_restart_helper);
    assert!(config.prefer_sync_over_rebuild);
    assert_eq!(
        config.append_dockerfile_instructions,
        vec!["USER root".to_string()]
    );
}
