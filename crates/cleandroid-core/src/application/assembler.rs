//! Content assembler.
//!
//! Decides which optional fragments end up in generated files and renders
//! them at a caller-chosen indentation. Every block is gated on
//! "requested by the flags AND available in the catalog"; a requested block
//! whose dependencies are unavailable is omitted without error.

use crate::domain::{
    DependencyId, DependencyInjection, FeatureFlags, Name, NetworkClient, VersionCatalogReader,
};

/// Which Gradle module a fragment is rendered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleKind {
    App,
    Feature,
    Core,
    Domain,
    Data,
}

impl ModuleKind {
    fn is_application(self) -> bool {
        self == Self::App
    }

    fn has_ui(self) -> bool {
        matches!(self, Self::App | Self::Feature)
    }

    fn has_network(self) -> bool {
        matches!(self, Self::Feature | Self::Data)
    }

    fn has_di(self) -> bool {
        self != Self::Domain
    }
}

/// Gradle configuration a dependency line uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Configuration {
    Implementation,
    Platform,
    Ksp,
    DebugOnly,
    TestOnly,
}

/// Plugin order in every generated `plugins {}` block.
const PLUGIN_ORDER: [DependencyId; 9] = [
    DependencyId::AndroidApplication,
    DependencyId::AndroidLibrary,
    DependencyId::KotlinAndroid,
    DependencyId::KotlinCompose,
    DependencyId::KotlinSerialization,
    DependencyId::Ksp,
    DependencyId::Hilt,
    DependencyId::Ktlint,
    DependencyId::Detekt,
];

/// DI wiring for one variant. `None` yields empty strings in every field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiFragments {
    pub application_imports: String,
    pub application_annotation: String,
    /// Statements inside `Application.onCreate`.
    pub application_entry: String,
    pub activity_imports: String,
    pub activity_annotation: String,
    pub viewmodel_imports: String,
    pub viewmodel_annotation: String,
    /// Placed between the class name and its parameter list.
    pub inject_constructor: String,
    pub inject_imports: String,
    pub module_imports: String,
    /// Body of the per-feature DI file.
    pub module_registration: String,
}

/// Network client wiring for a remote data source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetworkFragments {
    pub imports: String,
    /// Constructor parameter list of the implementation, without parens.
    pub constructor_params: String,
    /// Expression returning `List<String>`.
    pub fetch_expression: String,
    /// Extra top-level declarations (Retrofit service interface).
    pub declarations: String,
}

/// Renders fragments for one generation run.
#[derive(Debug, Clone, Copy)]
pub struct ContentAssembler<'a> {
    reader: &'a VersionCatalogReader,
    flags: FeatureFlags,
}

impl<'a> ContentAssembler<'a> {
    pub fn new(reader: &'a VersionCatalogReader, flags: FeatureFlags) -> Self {
        Self { reader, flags }
    }

    pub fn reader(&self) -> &VersionCatalogReader {
        self.reader
    }

    fn all_available(&self, ids: &[DependencyId]) -> bool {
        ids.iter().all(|id| self.reader.is_available(*id))
    }

    // ── Effective switches ───────────────────────────────────────────────────

    /// Compose is on only when every library the Compose templates import
    /// is available.
    pub fn compose_enabled(&self) -> bool {
        self.flags.compose
            && self.all_available(&[
                DependencyId::KotlinCompose,
                DependencyId::ComposeBom,
                DependencyId::ComposeUi,
                DependencyId::ComposeMaterial3,
                DependencyId::ActivityCompose,
            ])
    }

    pub fn ktlint_enabled(&self) -> bool {
        self.flags.ktlint && self.reader.is_available(DependencyId::Ktlint)
    }

    pub fn detekt_enabled(&self) -> bool {
        self.flags.detekt && self.reader.is_available(DependencyId::Detekt)
    }

    /// Requested DI, or `None` when its required entries are unavailable.
    pub fn dependency_injection(&self) -> DependencyInjection {
        let required: &[DependencyId] = match self.flags.di {
            DependencyInjection::Hilt => &[
                DependencyId::Hilt,
                DependencyId::Ksp,
                DependencyId::HiltAndroid,
                DependencyId::HiltCompiler,
            ],
            DependencyInjection::Koin => &[DependencyId::KoinAndroid],
            DependencyInjection::None => &[],
        };
        if self.all_available(required) {
            self.flags.di
        } else {
            DependencyInjection::None
        }
    }

    /// Requested client, or `None` when its libraries are unavailable.
    pub fn network_client(&self) -> NetworkClient {
        let required: &[DependencyId] = match self.flags.network {
            NetworkClient::Retrofit => &[DependencyId::Retrofit],
            NetworkClient::Ktor => &[DependencyId::KtorCore, DependencyId::KtorOkhttp],
            NetworkClient::None => &[],
        };
        if self.all_available(required) {
            self.flags.network
        } else {
            NetworkClient::None
        }
    }

    fn serialization_enabled(&self) -> bool {
        self.network_client() != NetworkClient::None
            && self.all_available(&[
                DependencyId::KotlinSerialization,
                DependencyId::KotlinxSerializationJson,
            ])
    }

    // ── Plugins ──────────────────────────────────────────────────────────────

    /// Plugins applied by `module`, in the fixed order.
    pub fn plugins(&self, module: ModuleKind) -> Vec<DependencyId> {
        let di = self.dependency_injection();
        PLUGIN_ORDER
            .into_iter()
            .filter(|id| match id {
                DependencyId::AndroidApplication => module.is_application(),
                DependencyId::AndroidLibrary => !module.is_application(),
                DependencyId::KotlinAndroid => true,
                DependencyId::KotlinCompose => module.has_ui() && self.compose_enabled(),
                DependencyId::KotlinSerialization => {
                    module.has_network() && self.serialization_enabled()
                }
                DependencyId::Ksp | DependencyId::Hilt => {
                    module.has_di() && di == DependencyInjection::Hilt
                }
                DependencyId::Ktlint => self.ktlint_enabled(),
                DependencyId::Detekt => self.detekt_enabled(),
                _ => false,
            })
            .filter(|id| self.reader.is_available(*id))
            .collect()
    }

    /// `alias(libs.plugins.…)` lines for a module's `plugins {}` block.
    pub fn plugin_lines(&self, module: ModuleKind, indent: usize) -> String {
        self.plugins(module)
            .into_iter()
            .filter_map(|id| self.reader.accessor(id))
            .map(|accessor| format!("{}alias({accessor})\n", pad(indent)))
            .collect()
    }

    /// `alias(…) apply false` lines for the root build file, covering every
    /// plugin any of `modules` applies.
    pub fn root_plugin_lines(&self, modules: &[ModuleKind], indent: usize) -> String {
        let used: Vec<DependencyId> = modules.iter().flat_map(|m| self.plugins(*m)).collect();
        PLUGIN_ORDER
            .into_iter()
            .filter(|id| used.contains(id))
            .filter_map(|id| self.reader.accessor(id))
            .map(|accessor| format!("{}alias({accessor}) apply false\n", pad(indent)))
            .collect()
    }

    // ── Lint ─────────────────────────────────────────────────────────────────

    /// `ktlint {}` / `detekt {}` configuration blocks.
    pub fn lint_blocks(&self, indent: usize) -> String {
        let mut out = String::new();
        if self.ktlint_enabled() {
            out.push_str(&indent_block(
                "ktlint {\n    android.set(true)\n    ignoreFailures.set(false)\n}\n",
                indent,
            ));
        }
        if self.detekt_enabled() {
            out.push_str(&indent_block(
                "detekt {\n    config.setFrom(files(\"$rootDir/config/detekt/detekt.yml\"))\n    buildUponDefaultConfig = true\n}\n",
                indent,
            ));
        }
        out
    }

    // ── Dependencies ─────────────────────────────────────────────────────────

    fn dependency_entries(&self, module: ModuleKind) -> Vec<(Configuration, DependencyId)> {
        use Configuration::*;

        let mut entries = Vec::new();
        if module == ModuleKind::Domain {
            entries.push((Implementation, DependencyId::CoroutinesAndroid));
            entries.push((TestOnly, DependencyId::Junit));
            return entries;
        }

        entries.push((Implementation, DependencyId::CoreKtx));
        match module {
            ModuleKind::App => {
                entries.push((Implementation, DependencyId::LifecycleRuntime));
                entries.push((Implementation, DependencyId::ActivityCompose));
            }
            ModuleKind::Feature => {
                entries.push((Implementation, DependencyId::LifecycleRuntime));
                entries.push((Implementation, DependencyId::LifecycleViewModel));
                entries.push((Implementation, DependencyId::CoroutinesAndroid));
            }
            _ => entries.push((Implementation, DependencyId::CoroutinesAndroid)),
        }

        if module.has_ui() && self.compose_enabled() {
            entries.push((Platform, DependencyId::ComposeBom));
            entries.push((Implementation, DependencyId::ComposeUi));
            entries.push((Implementation, DependencyId::ComposeMaterial3));
            entries.push((DebugOnly, DependencyId::ComposeUiTooling));
        }

        match self.dependency_injection() {
            DependencyInjection::Hilt => {
                entries.push((Implementation, DependencyId::HiltAndroid));
                entries.push((Ksp, DependencyId::HiltCompiler));
                if module.has_ui() && self.compose_enabled() {
                    entries.push((Implementation, DependencyId::HiltNavigationCompose));
                }
            }
            DependencyInjection::Koin => {
                entries.push((Implementation, DependencyId::KoinAndroid));
                if module.has_ui() && self.compose_enabled() {
                    entries.push((Implementation, DependencyId::KoinCompose));
                }
            }
            DependencyInjection::None => {}
        }

        if module.has_network() {
            match self.network_client() {
                NetworkClient::Retrofit => {
                    entries.push((Implementation, DependencyId::Retrofit));
                    if self.serialization_enabled() {
                        entries.push((Implementation, DependencyId::RetrofitSerialization));
                    }
                }
                NetworkClient::Ktor => {
                    entries.push((Implementation, DependencyId::KtorCore));
                    entries.push((Implementation, DependencyId::KtorOkhttp));
                    if self.serialization_enabled() {
                        entries.push((Implementation, DependencyId::KtorContentNegotiation));
                        entries.push((Implementation, DependencyId::KtorSerializationJson));
                    }
                }
                NetworkClient::None => {}
            }
            if self.serialization_enabled() {
                entries.push((Implementation, DependencyId::KotlinxSerializationJson));
            }
        }

        entries.push((TestOnly, DependencyId::Junit));
        entries
    }

    /// Lines for a module's `dependencies {}` block. Unavailable libraries
    /// are left out.
    pub fn dependency_lines(&self, module: ModuleKind, indent: usize) -> String {
        self.dependency_entries(module)
            .into_iter()
            .filter_map(|(configuration, id)| {
                let accessor = self.reader.accessor(id)?;
                let call = match configuration {
                    Configuration::Implementation => format!("implementation({accessor})"),
                    Configuration::Platform => format!("implementation(platform({accessor}))"),
                    Configuration::Ksp => format!("ksp({accessor})"),
                    Configuration::DebugOnly => format!("debugImplementation({accessor})"),
                    Configuration::TestOnly => format!("testImplementation({accessor})"),
                };
                Some(format!("{}{call}\n", pad(indent)))
            })
            .collect()
    }

    /// Every catalog entry the module's build file references.
    pub fn required_dependencies(&self, module: ModuleKind) -> Vec<DependencyId> {
        let mut ids = self.plugins(module);
        ids.extend(
            self.dependency_entries(module)
                .into_iter()
                .map(|(_, id)| id)
                .filter(|id| self.reader.is_available(*id)),
        );
        ids
    }

    // ── DI ───────────────────────────────────────────────────────────────────

    /// DI wiring for the effective variant.
    ///
    /// `feature` names the per-feature module; `app_class` is the
    /// `Application` subclass used by Koin's `androidContext`.
    pub fn di_fragments(&self, feature: &Name, app_class: &str) -> DiFragments {
        let module_name = format!("{}Module", feature.pascal());
        match self.dependency_injection() {
            DependencyInjection::Hilt => DiFragments {
                application_imports: "import dagger.hilt.android.HiltAndroidApp\n".into(),
                application_annotation: "@HiltAndroidApp\n".into(),
                application_entry: String::new(),
                activity_imports: "import dagger.hilt.android.AndroidEntryPoint\n".into(),
                activity_annotation: "@AndroidEntryPoint\n".into(),
                viewmodel_imports: "import dagger.hilt.android.lifecycle.HiltViewModel\n".into(),
                viewmodel_annotation: "@HiltViewModel\n".into(),
                inject_constructor: " @Inject constructor".into(),
                inject_imports: "import javax.inject.Inject\n".into(),
                module_imports: "import dagger.Module\nimport dagger.hilt.InstallIn\nimport dagger.hilt.components.SingletonComponent\n".into(),
                module_registration: format!(
                    "@Module\n@InstallIn(SingletonComponent::class)\nobject {module_name}\n"
                ),
            },
            DependencyInjection::Koin => DiFragments {
                application_imports: "import org.koin.android.ext.koin.androidContext\nimport org.koin.core.context.startKoin\n".into(),
                application_annotation: String::new(),
                application_entry: format!(
                    "startKoin {{\n    androidContext(this@{app_class})\n    modules(featureModules)\n}}\n"
                ),
                activity_imports: String::new(),
                activity_annotation: String::new(),
                viewmodel_imports: String::new(),
                viewmodel_annotation: String::new(),
                inject_constructor: String::new(),
                inject_imports: String::new(),
                module_imports: "import org.koin.dsl.module\n".into(),
                module_registration: format!(
                    "val {} = module {{\n}}\n",
                    koin_module_name(feature)
                ),
            },
            DependencyInjection::None => DiFragments::default(),
        }
    }

    // ── Network ──────────────────────────────────────────────────────────────

    /// Wiring for a remote data source named `name`.
    pub fn network_fragments(&self, name: &Name) -> NetworkFragments {
        let api = format!("{}Api", name.pascal());
        let path = name.kebab();
        match self.network_client() {
            NetworkClient::Retrofit => NetworkFragments {
                imports: "import retrofit2.http.GET\n".into(),
                constructor_params: format!("\n    private val api: {api},\n"),
                fetch_expression: "api.fetch()".into(),
                declarations: format!(
                    "\ninterface {api} {{\n    @GET(\"{path}\")\n    suspend fun fetch(): List<String>\n}}\n"
                ),
            },
            NetworkClient::Ktor => NetworkFragments {
                imports: "import io.ktor.client.HttpClient\nimport io.ktor.client.call.body\nimport io.ktor.client.request.get\n".into(),
                constructor_params: "\n    private val client: HttpClient,\n".into(),
                fetch_expression: format!("client.get(\"{path}\").body()"),
                declarations: String::new(),
            },
            NetworkClient::None => NetworkFragments {
                fetch_expression: "emptyList()".into(),
                ..NetworkFragments::default()
            },
        }
    }
}

fn pad(indent: usize) -> String {
    " ".repeat(indent)
}

/// Prefix every non-empty line of `block` with `indent` spaces.
pub fn indent_block(block: &str, indent: usize) -> String {
    let prefix = pad(indent);
    block
        .lines()
        .map(|line| {
            if line.is_empty() {
                "\n".to_owned()
            } else {
                format!("{prefix}{line}\n")
            }
        })
        .collect()
}

/// Top-level `val` holding a feature's Koin module, e.g. `loginModule`.
pub fn koin_module_name(feature: &Name) -> String {
    lower_first(&format!("{}Module", feature.pascal()))
}

fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CatalogVariant, ProjectCatalog, UserOverrides};

    fn flags() -> FeatureFlags {
        FeatureFlags::default()
    }

    fn name(s: &str) -> Name {
        Name::parse("name", s).unwrap()
    }

    #[test]
    fn plugin_order_is_fixed() {
        let reader = VersionCatalogReader::with_defaults();
        let flags = flags()
            .with_compose(true)
            .with_ktlint(true)
            .with_detekt(true)
            .with_di(DependencyInjection::Hilt);
        let assembler = ContentAssembler::new(&reader, flags);
        assert_eq!(
            assembler.plugins(ModuleKind::App),
            vec![
                DependencyId::AndroidApplication,
                DependencyId::KotlinAndroid,
                DependencyId::KotlinCompose,
                DependencyId::Ksp,
                DependencyId::Hilt,
                DependencyId::Ktlint,
                DependencyId::Detekt,
            ]
        );
    }

    #[test]
    fn plugin_lines_reuse_declared_alias() {
        let project = ProjectCatalog::parse(
            "[plugins]\nkotlin-android = { id = \"org.jetbrains.kotlin.android\", version.ref = \"kotlin\" }\n",
        );
        let reader = VersionCatalogReader::builder()
            .project_catalog(Some(&project))
            .build();
        let assembler = ContentAssembler::new(&reader, flags());

        let lines = assembler.plugin_lines(ModuleKind::Feature, 4);
        assert!(lines.contains("    alias(libs.plugins.kotlin.android)\n"), "{lines}");
        assert!(lines.starts_with("    alias(libs.plugins.androidLibrary)\n"), "{lines}");
    }

    #[test]
    fn unavailable_ktlint_is_omitted_silently() {
        let overrides = UserOverrides::default().with_disabled(DependencyId::Ktlint);
        let reader = VersionCatalogReader::builder()
            .overrides(&overrides, CatalogVariant::New)
            .build();
        let assembler = ContentAssembler::new(&reader, flags().with_ktlint(true).with_detekt(true));

        assert!(!assembler.ktlint_enabled());
        let plugins = assembler.plugin_lines(ModuleKind::App, 4);
        assert!(!plugins.contains("ktlint"), "{plugins}");
        assert!(plugins.contains("detekt"), "{plugins}");

        let blocks = assembler.lint_blocks(0);
        assert!(!blocks.contains("ktlint {"));
        assert!(blocks.starts_with("detekt {\n"));
    }

    #[test]
    fn empty_catalog_without_defaults_omits_everything_optional() {
        let reader = VersionCatalogReader::builder().defaults(&[]).build();
        let assembler = ContentAssembler::new(
            &reader,
            flags()
                .with_compose(true)
                .with_ktlint(true)
                .with_di(DependencyInjection::Koin)
                .with_network(NetworkClient::Ktor),
        );
        assert_eq!(assembler.plugin_lines(ModuleKind::App, 4), "");
        assert_eq!(assembler.dependency_lines(ModuleKind::Feature, 4), "");
        assert_eq!(assembler.lint_blocks(4), "");
        assert_eq!(assembler.dependency_injection(), DependencyInjection::None);
        assert_eq!(assembler.network_client(), NetworkClient::None);
    }

    #[test]
    fn hilt_degrades_to_none_without_ksp() {
        let overrides = UserOverrides::default().with_disabled(DependencyId::Ksp);
        let reader = VersionCatalogReader::builder()
            .overrides(&overrides, CatalogVariant::New)
            .build();
        let assembler =
            ContentAssembler::new(&reader, flags().with_di(DependencyInjection::Hilt));
        assert_eq!(assembler.dependency_injection(), DependencyInjection::None);
        assert_eq!(assembler.di_fragments(&name("login"), "App"), DiFragments::default());
    }

    #[test]
    fn compose_needs_every_library_its_templates_import() {
        for missing in [
            DependencyId::ComposeUi,
            DependencyId::ComposeMaterial3,
            DependencyId::ActivityCompose,
        ] {
            let overrides = UserOverrides::default().with_disabled(missing);
            let reader = VersionCatalogReader::builder()
                .overrides(&overrides, CatalogVariant::New)
                .build();
            let assembler = ContentAssembler::new(&reader, flags().with_compose(true));
            assert!(!assembler.compose_enabled(), "{missing:?}");
            assert!(!assembler.plugins(ModuleKind::App).contains(&DependencyId::KotlinCompose));
        }
    }

    #[test]
    fn hilt_degrades_to_none_without_compiler() {
        let overrides = UserOverrides::default().with_disabled(DependencyId::HiltCompiler);
        let reader = VersionCatalogReader::builder()
            .overrides(&overrides, CatalogVariant::New)
            .build();
        let assembler =
            ContentAssembler::new(&reader, flags().with_di(DependencyInjection::Hilt));
        assert_eq!(assembler.dependency_injection(), DependencyInjection::None);
        let lines = assembler.dependency_lines(ModuleKind::App, 0);
        assert!(!lines.contains("hilt"), "{lines}");
        assert!(assembler.di_fragments(&name("notes"), "App").application_annotation.is_empty());
    }

    #[test]
    fn every_di_variant_yields_complete_fragments() {
        let reader = VersionCatalogReader::with_defaults();
        for di in DependencyInjection::ALL {
            let assembler = ContentAssembler::new(&reader, flags().with_di(di));
            let fragments = assembler.di_fragments(&name("login"), "NotesApp");
            match di {
                DependencyInjection::Hilt => {
                    assert_eq!(fragments.application_annotation, "@HiltAndroidApp\n");
                    assert!(fragments.module_registration.contains("object LoginModule"));
                    assert_eq!(fragments.inject_constructor, " @Inject constructor");
                }
                DependencyInjection::Koin => {
                    assert!(fragments.application_entry.contains("androidContext(this@NotesApp)"));
                    assert!(fragments.application_entry.contains("modules(featureModules)"));
                    assert!(fragments.module_registration.starts_with("val loginModule = module {"));
                }
                DependencyInjection::None => {
                    assert!(fragments.application_entry.is_empty());
                    assert!(fragments.module_registration.is_empty());
                    assert!(fragments.application_imports.is_empty());
                }
            }
        }
    }

    #[test]
    fn compose_dependencies_use_bom_platform() {
        let reader = VersionCatalogReader::with_defaults();
        let assembler = ContentAssembler::new(&reader, flags().with_compose(true));
        let lines = assembler.dependency_lines(ModuleKind::App, 4);
        assert!(lines.contains("    implementation(platform(libs.composeBom))\n"), "{lines}");
        assert!(lines.contains("    debugImplementation(libs.uiTooling)\n"), "{lines}");
        assert!(lines.contains("    implementation(libs.activityCompose)\n"), "{lines}");
        assert!(lines.ends_with("    testImplementation(libs.junit)\n"), "{lines}");
    }

    #[test]
    fn network_wiring_follows_client() {
        let reader = VersionCatalogReader::with_defaults();

        let retrofit = ContentAssembler::new(&reader, flags().with_network(NetworkClient::Retrofit));
        let fragments = retrofit.network_fragments(&name("user"));
        assert!(fragments.declarations.contains("interface UserApi"));
        assert!(retrofit
            .dependency_lines(ModuleKind::Data, 0)
            .contains("implementation(libs.retrofit)\n"));
        assert!(retrofit.plugins(ModuleKind::Data).contains(&DependencyId::KotlinSerialization));
        assert!(!retrofit.plugins(ModuleKind::App).contains(&DependencyId::KotlinSerialization));

        let ktor = ContentAssembler::new(&reader, flags().with_network(NetworkClient::Ktor));
        assert!(ktor
            .network_fragments(&name("user"))
            .fetch_expression
            .starts_with("client.get(\"user\")"));

        let none = ContentAssembler::new(&reader, flags());
        let fragments = none.network_fragments(&name("user"));
        assert!(fragments.imports.is_empty());
        assert!(fragments.fetch_expression.starts_with("emptyList()"));
    }

    #[test]
    fn root_plugins_apply_false() {
        let reader = VersionCatalogReader::with_defaults();
        let assembler = ContentAssembler::new(&reader, flags());
        let lines = assembler.root_plugin_lines(&[ModuleKind::App, ModuleKind::Core], 4);
        assert_eq!(
            lines,
            "    alias(libs.plugins.androidApplication) apply false\n    alias(libs.plugins.androidLibrary) apply false\n    alias(libs.plugins.kotlinAndroid) apply false\n"
        );
    }

    #[test]
    fn indent_block_skips_blank_lines() {
        assert_eq!(indent_block("a {\n\n}\n", 2), "  a {\n\n  }\n");
    }
}
