//! Built-in file templates.
//!
//! Placeholders are `{{NAME}}`, filled from a
//! [`RenderContext`](crate::domain::RenderContext). Fragment placeholders
//! (`{{PLUGINS}}`, `{{DEPENDENCIES}}`, `{{DI_*}}` …) already carry their own
//! indentation and trailing newline, or are empty.

// ── Gradle ───────────────────────────────────────────────────────────────────

pub const SETTINGS_GRADLE: &str = r#"pluginManagement {
    repositories {
        google()
        mavenCentral()
        gradlePluginPortal()
    }
}

dependencyResolutionManagement {
    repositoriesMode.set(RepositoriesMode.FAIL_ON_PROJECT_REPOS)
    repositories {
        google()
        mavenCentral()
    }
}

rootProject.name = "{{APP_NAME}}"
include(":app")
"#;

pub const ROOT_BUILD_GRADLE: &str = r#"plugins {
{{PLUGINS}}}
"#;

pub const GRADLE_PROPERTIES: &str = r#"org.gradle.jvmargs=-Xmx2048m -Dfile.encoding=UTF-8
android.useAndroidX=true
kotlin.code.style=official
android.nonTransitiveRClass=true
"#;

pub const GITIGNORE: &str = r#"*.iml
.gradle
/local.properties
/.idea
.DS_Store
/build
/captures
.externalNativeBuild
.cxx
local.properties
"#;

pub const APP_BUILD_GRADLE: &str = r#"plugins {
{{PLUGINS}}}

android {
    namespace = "{{PACKAGE}}"
    compileSdk = {{COMPILE_SDK}}

    defaultConfig {
        applicationId = "{{PACKAGE}}"
        minSdk = {{MIN_SDK}}
        targetSdk = {{COMPILE_SDK}}
        versionCode = 1
        versionName = "1.0"
    }

    compileOptions {
        sourceCompatibility = JavaVersion.VERSION_17
        targetCompatibility = JavaVersion.VERSION_17
    }
    kotlinOptions {
        jvmTarget = "17"
    }
{{BUILD_FEATURES}}}

dependencies {
{{DEPENDENCIES}}}
{{LINT}}"#;

pub const LIBRARY_BUILD_GRADLE: &str = r#"plugins {
{{PLUGINS}}}

android {
    namespace = "{{PACKAGE}}"
    compileSdk = {{COMPILE_SDK}}

    defaultConfig {
        minSdk = {{MIN_SDK}}
    }

    compileOptions {
        sourceCompatibility = JavaVersion.VERSION_17
        targetCompatibility = JavaVersion.VERSION_17
    }
    kotlinOptions {
        jvmTarget = "17"
    }
{{BUILD_FEATURES}}}

dependencies {
{{DEPENDENCIES}}}
{{LINT}}"#;

pub const COMPOSE_BUILD_FEATURES: &str = r#"
    buildFeatures {
        compose = true
    }
"#;

// ── Lint configuration ───────────────────────────────────────────────────────

pub const EDITORCONFIG: &str = r#"root = true

[*]
charset = utf-8
end_of_line = lf
insert_final_newline = true
trim_trailing_whitespace = true

[*.{kt,kts}]
indent_size = 4
max_line_length = 120
ktlint_code_style = android_studio
ktlint_function_naming_ignore_when_annotated_with = Composable
"#;

pub const DETEKT_YML: &str = r#"build:
  maxIssues: 0

complexity:
  LongParameterList:
    functionThreshold: 8
    ignoreAnnotated: ['Composable']

naming:
  FunctionNaming:
    ignoreAnnotated: ['Composable']

style:
  MagicNumber:
    ignorePropertyDeclaration: true
    ignoreCompanionObjectPropertyDeclaration: true
"#;

// ── App module ───────────────────────────────────────────────────────────────

pub const ANDROID_MANIFEST: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<manifest xmlns:android="http://schemas.android.com/apk/res/android">

    <uses-permission android:name="android.permission.INTERNET" />

    <application
        android:name=".{{APP_CLASS}}"
        android:allowBackup="true"
        android:icon="@mipmap/ic_launcher"
        android:label="@string/app_name"
        android:supportsRtl="true"
        android:theme="@style/Theme.{{APP_NAME_PASCAL}}">
        <activity
            android:name=".MainActivity"
            android:exported="true">
            <intent-filter>
                <action android:name="android.intent.action.MAIN" />
                <category android:name="android.intent.category.LAUNCHER" />
            </intent-filter>
        </activity>
    </application>

</manifest>
"#;

pub const APPLICATION_CLASS: &str = r#"package {{PACKAGE}}

import android.app.Application
{{DI_APPLICATION_IMPORTS}}
{{DI_APPLICATION_ANNOTATION}}class {{APP_CLASS}} : Application() {

    override fun onCreate() {
        super.onCreate()
{{DI_APPLICATION_ENTRY}}    }
}
"#;

pub const MAIN_ACTIVITY_COMPOSE: &str = r#"package {{PACKAGE}}

import android.os.Bundle
import androidx.activity.ComponentActivity
import androidx.activity.compose.setContent
import androidx.compose.material3.Surface
import androidx.compose.material3.Text
import {{PACKAGE}}.ui.theme.{{APP_NAME_PASCAL}}Theme
{{DI_ACTIVITY_IMPORTS}}
{{DI_ACTIVITY_ANNOTATION}}class MainActivity : ComponentActivity() {

    override fun onCreate(savedInstanceState: Bundle?) {
        super.onCreate(savedInstanceState)
        setContent {
            {{APP_NAME_PASCAL}}Theme {
                Surface {
                    Text(text = "{{APP_NAME}}")
                }
            }
        }
    }
}
"#;

pub const MAIN_ACTIVITY_VIEWS: &str = r#"package {{PACKAGE}}

import android.os.Bundle
import android.widget.TextView
import androidx.activity.ComponentActivity
{{DI_ACTIVITY_IMPORTS}}
{{DI_ACTIVITY_ANNOTATION}}class MainActivity : ComponentActivity() {

    override fun onCreate(savedInstanceState: Bundle?) {
        super.onCreate(savedInstanceState)
        setContentView(TextView(this).apply { text = getString(R.string.app_name) })
    }
}
"#;

pub const STRINGS_XML: &str = r#"<resources>
    <string name="app_name">{{APP_NAME}}</string>
</resources>
"#;

pub const THEMES_XML: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<resources>
    <style name="Theme.{{APP_NAME_PASCAL}}" parent="android:Theme.Material.Light.NoActionBar" />
</resources>
"#;

pub const THEME_KT: &str = r#"package {{PACKAGE}}.ui.theme

import androidx.compose.foundation.isSystemInDarkTheme
import androidx.compose.material3.MaterialTheme
import androidx.compose.material3.darkColorScheme
import androidx.compose.material3.lightColorScheme
import androidx.compose.runtime.Composable

private val DarkColors = darkColorScheme(
    primary = Purple80,
    secondary = PurpleGrey80,
)

private val LightColors = lightColorScheme(
    primary = Purple40,
    secondary = PurpleGrey40,
)

@Composable
fun {{APP_NAME_PASCAL}}Theme(
    darkTheme: Boolean = isSystemInDarkTheme(),
    content: @Composable () -> Unit,
) {
    MaterialTheme(
        colorScheme = if (darkTheme) DarkColors else LightColors,
        typography = Typography,
        content = content,
    )
}
"#;

pub const COLOR_KT: &str = r#"package {{PACKAGE}}.ui.theme

import androidx.compose.ui.graphics.Color

val Purple80 = Color(0xFFD0BCFF)
val PurpleGrey80 = Color(0xFFCCC2DC)

val Purple40 = Color(0xFF6650A4)
val PurpleGrey40 = Color(0xFF625B71)
"#;

pub const TYPE_KT: &str = r#"package {{PACKAGE}}.ui.theme

import androidx.compose.material3.Typography

val Typography = Typography()
"#;

pub const EXAMPLE_UNIT_TEST: &str = r#"package {{PACKAGE}}

import org.junit.Assert.assertEquals
import org.junit.Test

class ExampleUnitTest {
    @Test
    fun addition_isCorrect() {
        assertEquals(4, 2 + 2)
    }
}
"#;

// ── Architecture modules ─────────────────────────────────────────────────────

pub const DISPATCHER_PROVIDER: &str = r#"package {{PACKAGE}}

import kotlinx.coroutines.CoroutineDispatcher
import kotlinx.coroutines.Dispatchers
{{DI_INJECT_IMPORTS}}
interface DispatcherProvider {
    val main: CoroutineDispatcher
    val io: CoroutineDispatcher
    val default: CoroutineDispatcher
}

class DefaultDispatcherProvider{{DI_INJECT_CONSTRUCTOR}}() : DispatcherProvider {
    override val main: CoroutineDispatcher = Dispatchers.Main
    override val io: CoroutineDispatcher = Dispatchers.IO
    override val default: CoroutineDispatcher = Dispatchers.Default
}
"#;

pub const RESULT_KT: &str = r#"package {{PACKAGE}}

sealed interface Result<out T> {
    data class Success<T>(val data: T) : Result<T>
    data class Error(val throwable: Throwable) : Result<Nothing>
}

inline fun <T> resultOf(block: () -> T): Result<T> =
    try {
        Result.Success(block())
    } catch (e: Exception) {
        Result.Error(e)
    }
"#;

pub const BASE_USE_CASE: &str = r#"package {{PACKAGE}}

import kotlinx.coroutines.CoroutineDispatcher
import kotlinx.coroutines.withContext

abstract class UseCase<in P, out R>(private val dispatcher: CoroutineDispatcher) {

    suspend operator fun invoke(params: P): Result<R> =
        withContext(dispatcher) { resultOf { execute(params) } }

    protected abstract suspend fun execute(params: P): R
}
"#;

pub const REPOSITORY_KT: &str = r#"package {{PACKAGE}}

/** Marker for repositories implemented in this module. */
interface Repository
"#;

// ── Feature module ───────────────────────────────────────────────────────────

/// Koin modules the application starts with. Each generated feature
/// appends a line adding its module to the list.
pub const KOIN_FEATURE_MODULES: &str = r#"package {{PACKAGE}}

import org.koin.core.module.Module

val featureModules = mutableListOf<Module>()

"#;

pub const DI_MODULE: &str = r#"package {{PACKAGE}}

{{DI_MODULE_IMPORTS}}
{{DI_MODULE_REGISTRATION}}"#;

pub const USE_CASE: &str = r#"package {{PACKAGE}}

{{DI_INJECT_IMPORTS}}
class {{NAME}}UseCase{{DI_INJECT_CONSTRUCTOR}}() {

    suspend operator fun invoke(): Result<Unit> = runCatching {
    }
}
"#;

pub const VIEW_MODEL: &str = r#"package {{PACKAGE}}

import androidx.lifecycle.ViewModel
import kotlinx.coroutines.flow.MutableStateFlow
import kotlinx.coroutines.flow.StateFlow
import kotlinx.coroutines.flow.asStateFlow
{{DI_VIEWMODEL_IMPORTS}}{{DI_INJECT_IMPORTS}}
{{DI_VIEWMODEL_ANNOTATION}}class {{NAME}}ViewModel{{DI_INJECT_CONSTRUCTOR}}() : ViewModel() {

    private val _uiState = MutableStateFlow({{NAME}}UiState())
    val uiState: StateFlow<{{NAME}}UiState> = _uiState.asStateFlow()
}
"#;

pub const UI_STATE: &str = r#"package {{PACKAGE}}

data class {{NAME}}UiState(
    val isLoading: Boolean = false,
    val errorMessage: String? = null,
)
"#;

pub const SCREEN: &str = r#"package {{PACKAGE}}

import androidx.compose.foundation.layout.Box
import androidx.compose.foundation.layout.fillMaxSize
import androidx.compose.material3.CircularProgressIndicator
import androidx.compose.material3.Text
import androidx.compose.runtime.Composable
import androidx.compose.ui.Alignment
import androidx.compose.ui.Modifier

@Composable
fun {{NAME}}Screen(
    state: {{NAME}}UiState,
    modifier: Modifier = Modifier,
) {
    Box(modifier = modifier.fillMaxSize(), contentAlignment = Alignment.Center) {
        when {
            state.isLoading -> CircularProgressIndicator()
            state.errorMessage != null -> Text(text = state.errorMessage)
            else -> Text(text = "{{NAME}}")
        }
    }
}
"#;

pub const DATA_SOURCE: &str = r#"package {{PACKAGE}}

interface {{NAME}}DataSource {
    suspend fun fetch(): List<String>
}
"#;

pub const LOCAL_DATA_SOURCE_IMPL: &str = r#"package {{PACKAGE}}

{{DI_INJECT_IMPORTS}}
class {{NAME}}DataSourceImpl{{DI_INJECT_CONSTRUCTOR}}() : {{NAME}}DataSource {

    private val items = mutableListOf<String>()

    override suspend fun fetch(): List<String> = items.toList()
}
"#;

pub const REMOTE_DATA_SOURCE_IMPL: &str = r#"package {{PACKAGE}}

{{NETWORK_IMPORTS}}{{DI_INJECT_IMPORTS}}
class {{NAME}}DataSourceImpl{{DI_INJECT_CONSTRUCTOR}}({{NETWORK_CONSTRUCTOR}}) : {{NAME}}DataSource {

    override suspend fun fetch(): List<String> = {{NETWORK_FETCH}}
}
{{NETWORK_DECLARATIONS}}"#;
