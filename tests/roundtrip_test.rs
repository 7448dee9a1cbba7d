//! Round-trip identity tests for every content type.
//!
//! The primary law: for every supported kind and every structured
//! instance in the image of the parser, generating markup and parsing it
//! back reproduces the structure exactly — and regeneration of the
//! canonical form is byte-stable.

use retex::parser::{parse_section, Engine};
use retex::render::{render_section_body, render_subsection};
use retex::{SectionKind, TypeRegistry};

/// Parse a section body by inference, render it, and check both tiers.
fn assert_section_roundtrip(name: &str, canonical: &str, expected_kind: SectionKind) {
    let registry = TypeRegistry::new();

    let section = parse_section(&registry, name, canonical);
    assert_eq!(section.kind, expected_kind, "inference picked wrong kind");

    let generated = render_section_body(&registry, &section).unwrap();
    assert_eq!(generated, canonical, "canonical form must regenerate byte-for-byte");

    let reparsed = parse_section(&registry, name, &generated);
    assert_eq!(reparsed, section, "semantic round trip must be exact");
}

const WORK_EXPERIENCE: &str = "\\begin{itemizeAcademic}{Acme}{Engineer\\\\Contractor}{Remote}{2020 -- 2022}\n\n    \\itemi First \\textbf{win}\n\n    \\itemi Second win\n\n    \\begin{itemizeAProject}{{\\large $\\bullet$}}{Pipeline}{2021}\n        \\itemii Did a thing\n        \\itemii Did another\n    \\end{itemizeAProject}\n\n\\end{itemizeAcademic}";

#[test]
fn work_history_roundtrip() {
    let canonical = format!("{WORK_EXPERIENCE}\n\n{}", WORK_EXPERIENCE.replace("Acme", "Initech"));
    assert_section_roundtrip("Experience", &canonical, SectionKind::WorkHistory);
}

#[test]
fn work_experience_structure() {
    let registry = TypeRegistry::new();
    let sub = Engine::new(&registry)
        .parse(SectionKind::WorkExperience, WORK_EXPERIENCE)
        .unwrap();

    assert_eq!(sub.metadata.get("company").unwrap().as_str(), Some("Acme"));
    assert_eq!(sub.metadata.get("title").unwrap().as_str(), Some("Engineer"));
    assert_eq!(
        sub.metadata.get("subtitle").unwrap().as_str(),
        Some("Contractor")
    );

    // Dual storage: raw keeps formatting, plain strips it.
    let bullets = sub.content.get("bullets").unwrap().as_sequence().unwrap();
    assert_eq!(
        bullets[0].get("raw").unwrap().as_str(),
        Some(r"First \textbf{win}")
    );
    assert_eq!(bullets[0].get("plain").unwrap().as_str(), Some("First win"));

    // Regeneration is byte-exact.
    let generated = render_subsection(&registry, &sub).unwrap();
    assert_eq!(generated, WORK_EXPERIENCE);
}

#[test]
fn work_experience_without_subtitle_roundtrip() {
    let canonical = "\\begin{itemizeAcademic}{Acme}{Engineer}{Remote}{2020}\n\n    \\itemi Solo line\n\n\\end{itemizeAcademic}";
    let registry = TypeRegistry::new();
    let sub = Engine::new(&registry)
        .parse(SectionKind::WorkExperience, canonical)
        .unwrap();

    // Absent delimiter leaves the subtitle unset, not empty.
    assert!(sub.metadata.get("subtitle").is_none());
    assert_eq!(render_subsection(&registry, &sub).unwrap(), canonical);
}

#[test]
fn nested_project_environment_name_is_preserved() {
    let canonical = WORK_EXPERIENCE.replace("itemizeAProject", "itemizeKeyProject");
    let registry = TypeRegistry::new();
    let sub = Engine::new(&registry)
        .parse(SectionKind::WorkExperience, &canonical)
        .unwrap();

    let project = &sub.subsections[0];
    assert_eq!(
        project.metadata.get("environment_type").unwrap().as_str(),
        Some("itemizeKeyProject")
    );
    assert_eq!(render_subsection(&registry, &sub).unwrap(), canonical);
}

#[test]
fn project_bullets_never_leak_into_parent() {
    let registry = TypeRegistry::new();
    let sub = Engine::new(&registry)
        .parse(SectionKind::WorkExperience, WORK_EXPERIENCE)
        .unwrap();

    let bullets = sub.content.get("bullets").unwrap().as_sequence().unwrap();
    assert_eq!(bullets.len(), 2);
    for bullet in bullets {
        let raw = bullet.get("raw").unwrap().as_str().unwrap();
        assert!(!raw.contains("Did a thing"));
        assert!(!raw.contains("itemizeAProject"));
    }

    let project = &sub.subsections[0];
    let project_bullets = project.content.get("bullets").unwrap().as_sequence().unwrap();
    assert_eq!(project_bullets.len(), 2);
}

#[test]
fn projects_section_roundtrip() {
    let canonical = "\\begin{itemizeProjMain}\n\n    \\begin{itemizeProjSecond}{{\\large $\\bullet$}}{Atlas}{2023}\n        \\itemii Led rollout\n    \\end{itemizeProjSecond}\n\n    \\begin{itemizeProjSecond}{{\\large $\\bullet$}}{Beacon}{2024}\n        \\itemii Cut latency\n    \\end{itemizeProjSecond}\n\n\\end{itemizeProjMain}";
    assert_section_roundtrip("Projects", canonical, SectionKind::Projects);
}

#[test]
fn skill_list_caps_roundtrip() {
    let canonical = "{ \\setlength{\\baselineskip}{10pt} \\setlength{\\parskip}{7.5pt} \\scshape\n\n    Data Engineering\n\n    Distributed Systems\n\n    ML Infrastructure\n\n}";
    assert_section_roundtrip("Core Skills", canonical, SectionKind::SkillListCaps);
}

#[test]
fn skill_list_pipes_roundtrip() {
    let canonical = r"\texttt{Python} | \texttt{C++} | \texttt{Bash}";
    assert_section_roundtrip("Languages", canonical, SectionKind::SkillListPipes);
}

#[test]
fn skill_list_pipes_special_characters() {
    let registry = TypeRegistry::new();
    let canonical = r"\texttt{C++} | \texttt{C\#} | \texttt{F\#}";
    let section = parse_section(&registry, "Languages", canonical);

    let list = section.content.get("list").unwrap().as_sequence().unwrap();
    let items: Vec<&str> = list.iter().filter_map(|v| v.as_str()).collect();
    assert_eq!(items, vec!["C++", r"C\#", r"F\#"]);
    assert_eq!(render_section_body(&registry, &section).unwrap(), canonical);
}

#[test]
fn skill_categories_roundtrip() {
    let canonical = "\\begin{itemize}[leftmargin=0pt]\n\n\\item[\\faDatabase] {\\scshape Databases}\n\\begin{itemizeLL}\n    \\itemLL {PostgreSQL}\n    \\itemLL {Redis}\n\\end{itemizeLL}\n\n\\item[\\faTools] {\\scshape Build Tooling}\n\\begin{itemizeLL}\n    \\itemLL {Bazel}\n\\end{itemizeLL}\n\n\\end{itemize}";
    assert_section_roundtrip("Software Tools", canonical, SectionKind::SkillCategories);
}

#[test]
fn skill_categories_preserve_order_and_icons() {
    let registry = TypeRegistry::new();
    let canonical = "\\begin{itemize}[leftmargin=0pt]\n\n\\item[\\faDatabase] {\\scshape Databases}\n\\begin{itemizeLL}\n    \\itemLL {PostgreSQL}\n\\end{itemizeLL}\n\n\\item[] {\\scshape Unlabelled}\n\\begin{itemizeLL}\n    \\itemLL {Misc}\n\\end{itemizeLL}\n\n\\end{itemize}";
    let section = parse_section(&registry, "Tools", canonical);

    assert_eq!(section.subsections.len(), 2);
    assert_eq!(
        section.subsections[0].metadata.get("icon").unwrap().as_str(),
        Some(r"\faDatabase")
    );
    // An empty icon stays an empty string, not a missing field.
    assert_eq!(
        section.subsections[1].metadata.get("icon").unwrap().as_str(),
        Some("")
    );
    assert_eq!(render_section_body(&registry, &section).unwrap(), canonical);
}

#[test]
fn education_roundtrip() {
    let canonical = "\\begin{itemize}[leftmargin=0pt, itemsep = 0pt]\n\n\\item[\\faUserGraduate] {\\scshape University of Somewhere} \\hfill Ann Arbor, MI\n\n    \\itemi Ph.D.\\ Physics \\hfill 2016 -- 2021\n\n    \\itemi B.S.\\ Mathematics \\hfill 2012 -- 2016\n\n\\end{itemize}";
    assert_section_roundtrip("Education", canonical, SectionKind::Education);
}

#[test]
fn personality_alias_array_roundtrip() {
    let canonical = "\\begin{itemizeMain}\n    \\item[\\faTheaterMasks] Improv comedy alum\n    \\item[\\faMicrophone] Karaoke regular\n\\end{itemizeMain}";
    assert_section_roundtrip("Alias Array", canonical, SectionKind::PersonalityAliasArray);
}

#[test]
fn custom_itemize_roundtrip() {
    let canonical = "\\begin{itemize}[leftmargin=12pt]\n    \\item[\\raisebox{-1pt}{>} 20,000] GPU-hours managed\n    \\item Scheduled across three clusters\n\\end{itemize}";
    assert_section_roundtrip("HPC Highlights", canonical, SectionKind::CustomItemize);
}

#[test]
fn unrecognized_environment_falls_back_to_simple_list() {
    let canonical = "\\begin{mystery}\n    \\item One thing\n    \\item Another thing\n\\end{mystery}";
    let registry = TypeRegistry::new();
    let section = parse_section(&registry, "Oddball", canonical);

    assert_eq!(section.kind, SectionKind::SimpleList);
    assert_eq!(
        section.metadata.get("environment").unwrap().as_str(),
        Some("mystery")
    );
    let items = section.content.get("items").unwrap().as_sequence().unwrap();
    assert_eq!(items.len(), 2);

    assert_eq!(render_section_body(&registry, &section).unwrap(), canonical);
}

#[test]
fn simple_list_custom_markers_roundtrip() {
    let canonical = "\\begin{itemizeLL}\n    \\itemLL {Chess}\n    \\itemLL {Hiking}\n\\end{itemizeLL}";
    assert_section_roundtrip("Interests", canonical, SectionKind::SimpleList);
}

#[test]
fn unknown_section_is_raw_passthrough() {
    let registry = TypeRegistry::new();
    let canonical = "completely free-form prose without structure";
    let section = parse_section(&registry, "Notes", canonical);

    assert_eq!(section.kind, SectionKind::Unknown);
    assert_eq!(render_section_body(&registry, &section).unwrap(), canonical);
}

#[test]
fn education_is_never_classified_as_category_list() {
    // The education body carries every category-list signal plus the
    // institution marker; the more specific kind must win.
    let registry = TypeRegistry::new();
    let education = "\\begin{itemize}[leftmargin=0pt, itemsep = 0pt]\n\n\\item[\\faUserGraduate] {\\scshape University of Somewhere} \\hfill Ann Arbor, MI\n\n    \\itemi Ph.D.\\ Physics \\hfill 2016 -- 2021\n\n\\end{itemize}";
    let section = parse_section(&registry, "Education", education);
    assert_eq!(section.kind, SectionKind::Education);
}
