use std::sync::Arc;

use super::{
    add_detekt_config, add_source, build_context, package_context, rel, source_dir, templates,
    with_di,
};
use crate::application::assembler::{ContentAssembler, ModuleKind};
use crate::domain::{
    ContentSource, DependencyInjection, DomainError, GenerationPlan, ProjectTemplateRequest,
    RenderContext, WritePolicy,
};

/// Modules a project can eventually contain; the root build file declares
/// their plugins up front so later requests need not edit it.
const ALL_MODULES: [ModuleKind; 5] = [
    ModuleKind::App,
    ModuleKind::Feature,
    ModuleKind::Core,
    ModuleKind::Domain,
    ModuleKind::Data,
];

pub(super) fn plan(
    request: &ProjectTemplateRequest,
    assembler: &ContentAssembler<'_>,
) -> Result<GenerationPlan, DomainError> {
    let mut plan = GenerationPlan::new();
    let app_class = format!("{}Application", request.app_name.pascal());

    let ctx = RenderContext::new(request.app_name.as_str())
        .with_variable("PACKAGE", request.package.to_string())
        .with_variable("APP_CLASS", &app_class)
        .with_variable("MIN_SDK", request.min_sdk.to_string())
        .with_variable("COMPILE_SDK", request.compile_sdk.to_string());
    let di = assembler.di_fragments(&request.app_name, &app_class);
    let ctx = Arc::new(with_di(ctx, &di));

    // ── root ─────────────────────────────────────────────────────────────────
    let root_ctx = Arc::new(
        ctx.as_ref()
            .clone()
            .with_variable("PLUGINS", assembler.root_plugin_lines(&ALL_MODULES, 4)),
    );
    plan.add_file(
        rel("settings.gradle.kts")?,
        ContentSource::template(templates::SETTINGS_GRADLE, &ctx),
        WritePolicy::CreateIfAbsent,
    );
    plan.add_file(
        rel("build.gradle.kts")?,
        ContentSource::template(templates::ROOT_BUILD_GRADLE, &root_ctx),
        WritePolicy::CreateIfAbsent,
    );
    plan.add_file(
        rel("gradle.properties")?,
        ContentSource::Text(templates::GRADLE_PROPERTIES.to_owned()),
        WritePolicy::CreateIfAbsent,
    );
    plan.add_file(
        rel(".gitignore")?,
        ContentSource::Text(templates::GITIGNORE.to_owned()),
        WritePolicy::CreateIfAbsent,
    );
    plan.add_directory(rel("gradle")?);
    plan.add_file(
        rel("gradle/libs.versions.toml")?,
        ContentSource::Catalog(Arc::new(assembler.reader().clone())),
        WritePolicy::CreateIfAbsent,
    );

    if assembler.ktlint_enabled() {
        plan.add_file(
            rel(".editorconfig")?,
            ContentSource::Text(templates::EDITORCONFIG.to_owned()),
            WritePolicy::OverwriteAlways,
        );
    }
    add_detekt_config(&mut plan, assembler, WritePolicy::OverwriteAlways)?;

    // ── app module ───────────────────────────────────────────────────────────
    let app_build_ctx = Arc::new(build_context(
        assembler,
        ModuleKind::App,
        ctx.as_ref().clone(),
    ));
    plan.add_directory(rel("app")?);
    plan.add_file(
        rel("app/build.gradle.kts")?,
        ContentSource::template(templates::APP_BUILD_GRADLE, &app_build_ctx),
        WritePolicy::CreateIfAbsent,
    );
    plan.add_include("app");
    plan.require(assembler.required_dependencies(ModuleKind::App));

    let main = rel("app/src/main")?;
    plan.add_file(
        main.join("AndroidManifest.xml")?,
        ContentSource::template(templates::ANDROID_MANIFEST, &ctx),
        WritePolicy::CreateIfAbsent,
    );

    let sources = source_dir("app", "main", &request.package)?;
    add_source(
        &mut plan,
        &sources,
        &format!("{app_class}.kt"),
        templates::APPLICATION_CLASS,
        &ctx,
    )?;

    if assembler.dependency_injection() == DependencyInjection::Koin {
        add_source(
            &mut plan,
            &sources,
            super::KOIN_FEATURE_MODULES_FILE,
            templates::KOIN_FEATURE_MODULES,
            &ctx,
        )?;
    }

    if assembler.compose_enabled() {
        add_source(
            &mut plan,
            &sources,
            "MainActivity.kt",
            templates::MAIN_ACTIVITY_COMPOSE,
            &ctx,
        )?;
        let theme = sources.join("ui")?.join("theme")?;
        add_source(&mut plan, &theme, "Theme.kt", templates::THEME_KT, &ctx)?;
        add_source(&mut plan, &theme, "Color.kt", templates::COLOR_KT, &ctx)?;
        add_source(&mut plan, &theme, "Type.kt", templates::TYPE_KT, &ctx)?;
    } else {
        add_source(
            &mut plan,
            &sources,
            "MainActivity.kt",
            templates::MAIN_ACTIVITY_VIEWS,
            &ctx,
        )?;
    }

    let values = main.join("res")?.join("values")?;
    add_source(&mut plan, &values, "strings.xml", templates::STRINGS_XML, &ctx)?;
    add_source(&mut plan, &values, "themes.xml", templates::THEMES_XML, &ctx)?;
    plan.add_resources(super::LAUNCHER_BUNDLE, main.join("res")?);

    let tests = source_dir("app", "test", &request.package)?;
    let test_ctx = Arc::new(package_context(&request.package));
    add_source(
        &mut plan,
        &tests,
        "ExampleUnitTest.kt",
        templates::EXAMPLE_UNIT_TEST,
        &test_ctx,
    )?;

    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::super::test_support::render;
    use super::*;
    use crate::domain::{
        CatalogVariant, DependencyId, FeatureFlags, RequestBuilder, UserOverrides,
        VersionCatalogReader,
    };

    fn request(flags: FeatureFlags) -> ProjectTemplateRequest {
        RequestBuilder::new("/work/notes")
            .name("My Notes")
            .package("com.acme.notes")
            .flags(flags)
            .build_project()
            .unwrap()
    }

    #[test]
    fn minimal_project_layout() {
        let reader = VersionCatalogReader::with_defaults();
        let assembler = ContentAssembler::new(&reader, FeatureFlags::default());
        let plan = plan(&request(FeatureFlags::default()), &assembler).unwrap();

        for path in [
            "settings.gradle.kts",
            "build.gradle.kts",
            "gradle/libs.versions.toml",
            "app/build.gradle.kts",
            "app/src/main/AndroidManifest.xml",
            "app/src/main/java/com/acme/notes/MyNotesApplication.kt",
            "app/src/main/java/com/acme/notes/MainActivity.kt",
            "app/src/test/java/com/acme/notes/ExampleUnitTest.kt",
        ] {
            assert!(plan.file(path).is_some(), "missing {path}");
        }
        assert!(plan.file(".editorconfig").is_none());
        assert!(plan.file("config/detekt/detekt.yml").is_none());
        assert!(matches!(
            plan.file("gradle/libs.versions.toml").unwrap().content,
            ContentSource::Catalog(_)
        ));
        assert!(plan.file("app/src/main/java/com/acme/notes/ui/theme/Theme.kt").is_none());
        assert_eq!(plan.resources().len(), 1);
        assert!(plan.validate().is_ok());
    }

    #[test]
    fn compose_and_lint_add_files() {
        let reader = VersionCatalogReader::with_defaults();
        let flags = FeatureFlags::default()
            .with_compose(true)
            .with_ktlint(true)
            .with_detekt(true);
        let assembler = ContentAssembler::new(&reader, flags);
        let plan = plan(&request(flags), &assembler).unwrap();

        assert!(plan.file("app/src/main/java/com/acme/notes/ui/theme/Theme.kt").is_some());
        let editorconfig = plan.file(".editorconfig").unwrap();
        assert_eq!(editorconfig.policy, WritePolicy::OverwriteAlways);
        assert_eq!(
            plan.file("config/detekt/detekt.yml").unwrap().policy,
            WritePolicy::OverwriteAlways
        );

        let build = render(plan.file("app/build.gradle.kts").unwrap());
        assert!(build.contains("    alias(libs.plugins.kotlinPluginCompose)\n"), "{build}");
        assert!(build.contains("buildFeatures {\n        compose = true"), "{build}");
        assert!(build.contains("\nktlint {\n"), "{build}");
        assert!(build.contains("minSdk = 24"), "{build}");
    }

    #[test]
    fn unavailable_compose_falls_back_to_views() {
        let overrides = UserOverrides::default().with_disabled(DependencyId::ComposeBom);
        let reader = VersionCatalogReader::builder()
            .overrides(&overrides, CatalogVariant::New)
            .build();
        let flags = FeatureFlags::default().with_compose(true);
        let assembler = ContentAssembler::new(&reader, flags);
        let plan = plan(&request(flags), &assembler).unwrap();

        let activity = render(
            plan.file("app/src/main/java/com/acme/notes/MainActivity.kt")
                .unwrap(),
        );
        assert!(!activity.contains("setContent {"));
        let build = render(plan.file("app/build.gradle.kts").unwrap());
        assert!(!build.contains("kotlinPluginCompose"), "{build}");
        assert!(!build.contains("buildFeatures"), "{build}");
    }

    #[test]
    fn partial_compose_catalog_falls_back_to_views() {
        let overrides = UserOverrides::default().with_disabled(DependencyId::ComposeMaterial3);
        let reader = VersionCatalogReader::builder()
            .overrides(&overrides, CatalogVariant::New)
            .build();
        let flags = FeatureFlags::default().with_compose(true);
        let assembler = ContentAssembler::new(&reader, flags);
        let plan = plan(&request(flags), &assembler).unwrap();

        assert!(plan.file("app/src/main/java/com/acme/notes/ui/theme/Theme.kt").is_none());
        let build = render(plan.file("app/build.gradle.kts").unwrap());
        assert!(!build.contains("buildFeatures"), "{build}");
    }

    #[test]
    fn hilt_application_is_annotated() {
        let reader = VersionCatalogReader::with_defaults();
        let flags = FeatureFlags::default().with_di(DependencyInjection::Hilt);
        let assembler = ContentAssembler::new(&reader, flags);
        let plan = plan(&request(flags), &assembler).unwrap();

        let app = render(
            plan.file("app/src/main/java/com/acme/notes/MyNotesApplication.kt")
                .unwrap(),
        );
        assert!(app.contains("@HiltAndroidApp\nclass MyNotesApplication : Application()"), "{app}");
        assert!(plan.dependencies().contains(&DependencyId::HiltCompiler));
    }

    #[test]
    fn koin_application_starts_koin() {
        let reader = VersionCatalogReader::with_defaults();
        let flags = FeatureFlags::default().with_di(DependencyInjection::Koin);
        let assembler = ContentAssembler::new(&reader, flags);
        let plan = plan(&request(flags), &assembler).unwrap();

        let app = render(
            plan.file("app/src/main/java/com/acme/notes/MyNotesApplication.kt")
                .unwrap(),
        );
        assert!(
            app.contains("        startKoin {\n            androidContext(this@MyNotesApplication)"),
            "{app}"
        );
        assert!(app.contains("            modules(featureModules)\n"), "{app}");

        let modules = render(
            plan.file("app/src/main/java/com/acme/notes/FeatureModules.kt")
                .unwrap(),
        );
        assert!(modules.starts_with("package com.acme.notes\n"), "{modules}");
        assert!(modules.contains("val featureModules = mutableListOf<Module>()"), "{modules}");
    }
}
