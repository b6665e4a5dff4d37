//! Best-effort project-type classification, used only to pick a list icon.
//!
//! A fixed table of rules is checked in order against the top level of a
//! project folder; the first match wins. Detection errors count as "no match".

use serde::ser::{Serialize, SerializeStruct, Serializer};
use serde_json::Value as JsonValue;
use std::fs;
use std::path::Path;

const DEVICON_BASE: &str = "https://cdn.jsdelivr.net/gh/devicons/devicon/icons";

#[derive(Debug, Clone, Copy)]
pub enum Marker {
    /// A file or directory with this exact name exists.
    File(&'static str),
    /// Any top-level entry has this extension (e.g. `csproj`).
    Extension(&'static str),
    /// `package.json` lists this name in dependencies or devDependencies.
    PackageDep(&'static str),
    /// The file exists and contains the needle (case-insensitive).
    FileContains(&'static str, &'static str),
    /// Every inner marker matches.
    All(&'static [Marker]),
}

#[derive(Debug)]
pub struct ProjectType {
    pub id: &'static str,
    /// Icon reference: a devicon path or a bundled asset name.
    pub icon: &'static str,
    /// Any one marker is enough.
    pub markers: &'static [Marker],
}

// Consumers get the resolved icon URL, never the bare devicon fragment.
impl Serialize for ProjectType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ProjectType", 2)?;
        state.serialize_field("id", self.id)?;
        state.serialize_field("icon", &self.icon_url())?;
        state.end()
    }
}

impl ProjectType {
    pub fn icon_url(&self) -> String {
        if self.icon.starts_with("icons/") {
            self.icon.to_string()
        } else {
            format!("{}/{}", DEVICON_BASE, self.icon)
        }
    }

    pub fn matches(&self, dir: &Path) -> bool {
        self.markers.iter().any(|marker| marker_matches(marker, dir))
    }
}

pub static GENERIC: ProjectType = ProjectType {
    id: "code",
    icon: "code/code-original.svg",
    markers: &[],
};

macro_rules! project {
    ($id:literal, $icon:literal, [$($marker:expr),* $(,)?]) => {
        ProjectType {
            id: $id,
            icon: $icon,
            markers: &[$($marker),*],
        }
    };
}

use Marker::{All, Extension, File, FileContains, PackageDep};

/// Detection table, most specific first.
pub static PROJECT_TYPES: &[ProjectType] = &[
    // JavaScript / TypeScript frameworks
    project!("raycast", "icons/raycast.svg", [File("raycast-env.d.ts"), PackageDep("@raycast/api")]),
    project!("nextjs", "nextjs/nextjs-original.svg", [File("next.config.js"), File("next.config.mjs"), PackageDep("next")]),
    project!("vue", "vuejs/vuejs-original.svg", [PackageDep("vue"), PackageDep("nuxt")]),
    project!("angular", "angularjs/angularjs-original.svg", [PackageDep("@angular/core"), File("angular.json")]),
    project!("svelte", "svelte/svelte-original.svg", [PackageDep("svelte"), File("svelte.config.js")]),
    project!("react", "react/react-original.svg", [PackageDep("react")]),
    project!("nodejs", "nodejs/nodejs-original.svg", [File("package.json")]),
    // Backend frameworks
    project!("django", "django/django-plain.svg", [File("manage.py"), File("settings.py")]),
    project!("flask", "flask/flask-original.svg", [FileContains("requirements.txt", "flask")]),
    project!("fastapi", "fastapi/fastapi-original.svg", [FileContains("requirements.txt", "fastapi")]),
    project!("spring", "spring/spring-original.svg", [File("pom.xml"), File("build.gradle")]),
    project!("rails", "rails/rails-plain.svg", [All(&[File("Gemfile"), File("config.ru")])]),
    // Languages
    project!("python", "python/python-original.svg", [File("pyproject.toml"), File("requirements.txt"), File("setup.py")]),
    project!("go", "go/go-original.svg", [File("go.mod")]),
    project!("rust", "rust/rust-plain.svg", [File("Cargo.toml")]),
    project!("java", "java/java-original.svg", [File("pom.xml"), File("build.gradle"), File("build.gradle.kts")]),
    project!("kotlin", "kotlin/kotlin-original.svg", [File("build.gradle.kts"), File("settings.gradle.kts")]),
    project!("ruby", "ruby/ruby-original.svg", [File("Gemfile")]),
    project!("php", "php/php-original.svg", [File("composer.json")]),
    project!("csharp", "csharp/csharp-original.svg", [Extension("csproj"), Extension("sln")]),
    project!("swift", "swift/swift-original.svg", [File("Package.swift"), Extension("xcodeproj")]),
    project!("elixir", "elixir/elixir-original.svg", [File("mix.exs")]),
    project!("flutter", "flutter/flutter-original.svg", [FileContains("pubspec.yaml", "flutter:")]),
    project!("dart", "dart/dart-original.svg", [File("pubspec.yaml")]),
    project!("scala", "scala/scala-original.svg", [File("build.sbt")]),
    project!("haskell", "haskell/haskell-original.svg", [File("stack.yaml"), File("cabal.project")]),
];

/// First matching type for `dir`, or [`GENERIC`].
pub fn detect_project_type(dir: &Path) -> &'static ProjectType {
    if !dir.is_dir() {
        return &GENERIC;
    }
    PROJECT_TYPES
        .iter()
        .find(|project| project.matches(dir))
        .unwrap_or(&GENERIC)
}

pub fn project_type_by_id(id: &str) -> Option<&'static ProjectType> {
    if id == GENERIC.id {
        return Some(&GENERIC);
    }
    PROJECT_TYPES.iter().find(|project| project.id == id)
}

fn marker_matches(marker: &Marker, dir: &Path) -> bool {
    match marker {
        Marker::File(name) => dir.join(name).exists(),
        Marker::Extension(ext) => has_entry_with_extension(dir, ext),
        Marker::PackageDep(dep) => has_package_dep(dir, dep),
        Marker::FileContains(file, needle) => fs::read_to_string(dir.join(file))
            .map(|content| content.to_lowercase().contains(&needle.to_lowercase()))
            .unwrap_or(false),
        Marker::All(inner) => inner.iter().all(|m| marker_matches(m, dir)),
    }
}

fn has_entry_with_extension(dir: &Path, ext: &str) -> bool {
    let Ok(entries) = fs::read_dir(dir) else {
        return false;
    };
    entries.flatten().any(|entry| {
        entry
            .path()
            .extension()
            .is_some_and(|found| found.eq_ignore_ascii_case(ext))
    })
}

fn has_package_dep(dir: &Path, dep: &str) -> bool {
    let Ok(content) = fs::read_to_string(dir.join("package.json")) else {
        return false;
    };
    let Ok(manifest) = serde_json::from_str::<JsonValue>(&content) else {
        return false;
    };
    ["dependencies", "devDependencies"]
        .iter()
        .any(|section| manifest.get(section).and_then(|deps| deps.get(dep)).is_some())
}
