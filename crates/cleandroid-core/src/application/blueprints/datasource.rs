use std::sync::Arc;

use super::{add_source, package_context, source_dir, templates, with_di};
use crate::application::assembler::{ContentAssembler, ModuleKind};
use crate::domain::entities::request::{feature_module, feature_package};
use crate::domain::{DataSourceFlavor, DataSourceRequest, DomainError, GenerationPlan};

pub(super) fn plan(
    request: &DataSourceRequest,
    assembler: &ContentAssembler<'_>,
) -> Result<GenerationPlan, DomainError> {
    let mut plan = GenerationPlan::new();
    let package = feature_package(&request.package, &request.feature)
        .child("data")
        .child(request.flavor.package_segment());
    let dir = source_dir(&feature_module(&request.feature), "main", &package)?;
    let name = request.name.pascal();

    let di = assembler.di_fragments(&request.feature, "");
    let mut ctx = with_di(package_context(&package), &di).with_variable("NAME", &name);

    let implementation = match request.flavor {
        DataSourceFlavor::Local => templates::LOCAL_DATA_SOURCE_IMPL,
        DataSourceFlavor::Remote => {
            let network = assembler.network_fragments(&request.name);
            ctx = ctx
                .with_variable("NETWORK_IMPORTS", network.imports)
                .with_variable("NETWORK_CONSTRUCTOR", network.constructor_params)
                .with_variable("NETWORK_FETCH", network.fetch_expression)
                .with_variable("NETWORK_DECLARATIONS", network.declarations);
            plan.require(
                assembler
                    .required_dependencies(ModuleKind::Feature)
                    .into_iter()
                    .filter(|id| id.is_network()),
            );
            templates::REMOTE_DATA_SOURCE_IMPL
        }
    };

    let ctx = Arc::new(ctx);
    add_source(
        &mut plan,
        &dir,
        &format!("{name}DataSource.kt"),
        templates::DATA_SOURCE,
        &ctx,
    )?;
    add_source(
        &mut plan,
        &dir,
        &format!("{name}DataSourceImpl.kt"),
        implementation,
        &ctx,
    )?;
    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::super::test_support::render;
    use super::*;
    use crate::domain::{
        DependencyId, DependencyInjection, FeatureFlags, NetworkClient, RequestBuilder,
        VersionCatalogReader,
    };

    const BASE: &str = "feature-news/src/main/java/com/acme/notes/feature/news/data";

    fn request(flavor: DataSourceFlavor, flags: FeatureFlags) -> DataSourceRequest {
        RequestBuilder::new("/work/notes")
            .name("articles")
            .feature("news")
            .package("com.acme.notes")
            .flavor(flavor)
            .flags(flags)
            .build_data_source()
            .unwrap()
    }

    #[test]
    fn local_flavor() {
        let reader = VersionCatalogReader::with_defaults();
        let assembler = ContentAssembler::new(&reader, FeatureFlags::default());
        let plan = plan(&request(DataSourceFlavor::Local, FeatureFlags::default()), &assembler)
            .unwrap();

        let interface = render(plan.file(&format!("{BASE}/local/ArticlesDataSource.kt")).unwrap());
        assert!(interface.starts_with("package com.acme.notes.feature.news.data.local\n"));
        let implementation =
            render(plan.file(&format!("{BASE}/local/ArticlesDataSourceImpl.kt")).unwrap());
        assert!(implementation.contains("class ArticlesDataSourceImpl() : ArticlesDataSource"));
        assert!(plan.dependencies().is_empty());
    }

    #[test]
    fn remote_retrofit_declares_service() {
        let reader = VersionCatalogReader::with_defaults();
        let flags = FeatureFlags::default()
            .with_network(NetworkClient::Retrofit)
            .with_di(DependencyInjection::Hilt);
        let assembler = ContentAssembler::new(&reader, flags);
        let plan = plan(&request(DataSourceFlavor::Remote, flags), &assembler).unwrap();

        let implementation =
            render(plan.file(&format!("{BASE}/remote/ArticlesDataSourceImpl.kt")).unwrap());
        assert!(implementation.contains("import retrofit2.http.GET\n"), "{implementation}");
        assert!(
            implementation.contains(
                "class ArticlesDataSourceImpl @Inject constructor(\n    private val api: ArticlesApi,\n)"
            ),
            "{implementation}"
        );
        assert!(implementation.contains("= api.fetch()"));
        assert!(implementation.contains("interface ArticlesApi {\n    @GET(\"articles\")"));
        assert!(plan.dependencies().contains(&DependencyId::Retrofit));
    }

    #[test]
    fn remote_ktor_uses_client() {
        let reader = VersionCatalogReader::with_defaults();
        let flags = FeatureFlags::default().with_network(NetworkClient::Ktor);
        let assembler = ContentAssembler::new(&reader, flags);
        let plan = plan(&request(DataSourceFlavor::Remote, flags), &assembler).unwrap();

        let implementation =
            render(plan.file(&format!("{BASE}/remote/ArticlesDataSourceImpl.kt")).unwrap());
        assert!(implementation.contains("private val client: HttpClient,"));
        assert!(implementation.contains("= client.get(\"articles\").body()"));
    }

    #[test]
    fn remote_without_client_returns_empty_list() {
        let reader = VersionCatalogReader::with_defaults();
        let assembler = ContentAssembler::new(&reader, FeatureFlags::default());
        let plan = plan(&request(DataSourceFlavor::Remote, FeatureFlags::default()), &assembler)
            .unwrap();

        let implementation =
            render(plan.file(&format!("{BASE}/remote/ArticlesDataSourceImpl.kt")).unwrap());
        assert!(implementation.contains("class ArticlesDataSourceImpl() : ArticlesDataSource"));
        assert!(implementation.contains("= emptyList()"));
        assert!(!implementation.contains("{{"));
    }
}
