//! ATS-style keyword scan: lowercase the extracted resume text and test
//! containment against a fixed vocabulary. No tokenization, no stemming,
//! no confidence scoring.

/// Vocabulary the scan recognizes. Matches are reported in this
/// capitalization regardless of how the resume spells them.
pub const SKILL_KEYWORDS: &[&str] = &[
    // Languages
    "JavaScript",
    "TypeScript",
    "Python",
    "Java",
    "C++",
    "C#",
    "Ruby",
    "PHP",
    "Swift",
    "Kotlin",
    "Rust",
    "Scala",
    "Dart",
    "Elixir",
    // Frontend
    "React",
    "Angular",
    "Vue",
    "Next.js",
    "Svelte",
    "Redux",
    "jQuery",
    "Bootstrap",
    "Tailwind",
    "HTML",
    "CSS",
    "Sass",
    "Webpack",
    "Vite",
    // Backend
    "Node.js",
    "Express",
    "NestJS",
    "Django",
    "Flask",
    "FastAPI",
    "Spring Boot",
    "Laravel",
    "Rails",
    "ASP.NET",
    "GraphQL",
    "REST",
    "gRPC",
    "Microservices",
    "WebSockets",
    "OAuth",
    // Databases
    "PostgreSQL",
    "MySQL",
    "MongoDB",
    "SQLite",
    "Redis",
    "Elasticsearch",
    "Cassandra",
    "DynamoDB",
    "Firebase",
    // Cloud & DevOps
    "AWS",
    "Azure",
    "GCP",
    "Docker",
    "Kubernetes",
    "Terraform",
    "Ansible",
    "Jenkins",
    "GitHub Actions",
    "Nginx",
    "Linux",
    "Bash",
    "CI/CD",
    "Serverless",
    "Heroku",
    // Data & ML
    "Machine Learning",
    "Deep Learning",
    "TensorFlow",
    "PyTorch",
    "Pandas",
    "NumPy",
    "Tableau",
    "Power BI",
    "Spark",
    "Kafka",
    "Airflow",
    // Mobile
    "Android",
    "iOS",
    "React Native",
    "Flutter",
    // Tools & practice
    "Git",
    "Jira",
    "Agile",
    "Scrum",
    "Figma",
    "Photoshop",
    "Selenium",
    "Cypress",
    "Jest",
];

/// Returns the subset of the vocabulary contained in `text`,
/// case-insensitively, in vocabulary order. The vocabulary has no duplicate
/// entries, so the result is already deduplicated.
pub fn scan_skills(text: &str) -> Vec<String> {
    let haystack = text.to_lowercase();

    SKILL_KEYWORDS
        .iter()
        .filter(|keyword| haystack.contains(&keyword.to_lowercase()))
        .map(|keyword| keyword.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(mut skills: Vec<String>) -> Vec<String> {
        skills.sort();
        skills
    }

    #[test]
    fn test_react_and_aws_and_nothing_else() {
        let skills = scan_skills("Experienced in React and AWS");
        assert_eq!(sorted(skills), vec!["AWS", "React"]);
    }

    #[test]
    fn test_match_is_case_insensitive() {
        let skills = scan_skills("worked with POSTGRESQL and docker in production");
        assert_eq!(sorted(skills), vec!["Docker", "PostgreSQL"]);
    }

    #[test]
    fn test_repeated_mentions_reported_once() {
        let skills = scan_skills("Rust, Rust and more Rust");
        assert_eq!(skills, vec!["Rust"]);
    }

    #[test]
    fn test_substring_scan_has_no_word_boundaries() {
        // "JavaScript" contains "Java": both are reported. The scan is a plain
        // containment test over the vocabulary.
        let skills = scan_skills("Senior JavaScript developer");
        assert!(skills.contains(&"JavaScript".to_string()));
        assert!(skills.contains(&"Java".to_string()));
    }

    #[test]
    fn test_multi_word_keywords() {
        let skills = scan_skills("Led a machine learning project on React Native");
        assert!(skills.contains(&"Machine Learning".to_string()));
        assert!(skills.contains(&"React Native".to_string()));
    }

    #[test]
    fn test_empty_text_yields_nothing() {
        assert!(scan_skills("").is_empty());
    }

    #[test]
    fn test_vocabulary_has_no_duplicates() {
        let mut seen = std::collections::HashSet::new();
        for keyword in SKILL_KEYWORDS {
            assert!(seen.insert(keyword.to_lowercase()), "duplicate: {keyword}");
        }
    }
}
