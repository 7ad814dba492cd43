//! Synthetic catalog data for local development and load testing.

use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use confcat_core::error::{ConfcatError, Result};
use confcat_core::session::{Session, Speaker, Tag};

use crate::memory_catalog::InMemoryCatalog;

const TAGS: [&str; 35] = [
    "aws", "azure", "gcp", "kubernetes", "docker", "beginner", "intermediate", "advanced", "web",
    "mobile", "cloud", "security", "database", "frontend", "backend", "devops", "machine-learning",
    "ai", "blockchain", "iot", "networking", "architecture", "performance", "testing", "agile",
    "microservices", "serverless", "javascript", "python", "csharp", "java", "react", "angular",
    "vue", "dotnet",
];

const LOCATIONS: [&str; 11] = [
    "Online", "New York", "San Francisco", "Seattle", "Chicago", "Austin", "Boston", "London",
    "Berlin", "Tokyo", "Sydney",
];

const FIRST_NAMES: [&str; 40] = [
    "James", "Mary", "John", "Patricia", "Robert", "Jennifer", "Michael", "Linda", "William",
    "Elizabeth", "David", "Barbara", "Richard", "Susan", "Joseph", "Jessica", "Thomas", "Sarah",
    "Charles", "Karen", "Daniel", "Lisa", "Matthew", "Nancy", "Anthony", "Margaret", "Mark",
    "Betty", "Donald", "Sandra", "Steven", "Ashley", "Andrew", "Dorothy", "Paul", "Kimberly",
    "Joshua", "Emily", "Kenneth", "Donna",
];

const LAST_NAMES: [&str; 40] = [
    "Smith", "Johnson", "Williams", "Jones", "Brown", "Davis", "Miller", "Wilson", "Moore",
    "Taylor", "Anderson", "Thomas", "Jackson", "White", "Harris", "Martin", "Thompson", "Garcia",
    "Martinez", "Robinson", "Clark", "Rodriguez", "Lewis", "Lee", "Walker", "Hall", "Allen",
    "Young", "Hernandez", "King", "Wright", "Lopez", "Hill", "Scott", "Green", "Adams", "Baker",
    "Gonzalez", "Nelson", "Carter",
];

const EXPERTISE: [&str; 20] = [
    "Cloud Architecture", "DevOps Engineering", "Web Development", "Mobile Development",
    "Database Administration", "Security", "Machine Learning", "Artificial Intelligence",
    "Network Engineering", "Software Architecture", "Quality Assurance", "Agile Coaching",
    "Frontend Development", "Backend Development", "IoT Development", "Blockchain",
    "Data Science", "UI/UX Design", "Product Management", "System Administration",
];

const TITLE_PREFIXES: [&str; 10] = [
    "Introduction to", "Advanced", "Mastering", "Deep Dive into", "Building with",
    "The Future of", "Understanding", "Exploring", "Practical", "Enterprise",
];

const TITLE_SUBJECTS: [&str; 25] = [
    "Azure", "AWS", "Kubernetes", "Docker", "Microservices", "DevOps", "Cloud Security",
    "Serverless Computing", "React", "Vue.js", "Angular", ".NET Core", "Python",
    "Machine Learning", "Artificial Intelligence", "Blockchain", "IoT", "Database Performance",
    "Web Development", "Mobile Development", "API Design", "Test Automation", "CI/CD Pipelines",
    "Agile Methodologies", "Data Science",
];

const DESCRIPTIONS: [&str; 10] = [
    "Learn the fundamentals and best practices that will help you build scalable and reliable solutions.",
    "Deep dive into advanced techniques that will take your skills to the next level.",
    "A comprehensive overview of key concepts, tools, and methodologies.",
    "Hands-on workshop designed to give you practical experience with real-world scenarios.",
    "Explore cutting-edge technologies and how they're shaping the future of the industry.",
    "Join us for this technical session where we'll cover architecture patterns and implementation details.",
    "This session will provide you with the knowledge to solve complex problems and optimize performance.",
    "From beginner to expert: everything you need to know to get started and advance your career.",
    "Learn from industry experts about the latest trends, challenges, and opportunities.",
    "A case study approach to understanding how these technologies are used in production environments.",
];

const SPEAKER_COUNT: usize = 50;

/// Outcome of a seeding run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub tags: usize,
    pub speakers: usize,
    pub sessions: usize,
    /// True when the catalog already held sessions and nothing was written.
    pub skipped: bool,
}

/// Deterministic catalog generator.
///
/// The same seed and anchor always produce the same catalog.
pub struct DataGenerator {
    rng: StdRng,
    anchor: DateTime<Utc>,
}

impl DataGenerator {
    /// `anchor` is the instant session start dates are spread around
    /// (±180 days).
    pub fn new(seed: u64, anchor: DateTime<Utc>) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            anchor,
        }
    }

    /// Fills `catalog` with tags, 50 speakers and `session_count` sessions.
    ///
    /// Does nothing if the catalog already holds sessions. Tags are reused
    /// by name when present.
    pub async fn generate(
        &mut self,
        catalog: &InMemoryCatalog,
        session_count: usize,
    ) -> Result<SeedReport> {
        if catalog.session_count().await > 0 {
            tracing::info!(
                target: "confcat::catalog",
                "Catalog already contains sessions, skipping test data generation"
            );
            return Ok(SeedReport {
                skipped: true,
                ..SeedReport::default()
            });
        }

        tracing::info!(
            target: "confcat::catalog",
            "Generating {} test sessions",
            session_count
        );

        let mut tags = Vec::with_capacity(TAGS.len());
        for name in TAGS {
            tags.push(catalog.insert_tag(Tag::new(name)).await);
        }

        let mut speakers = Vec::with_capacity(SPEAKER_COUNT);
        for _ in 0..SPEAKER_COUNT {
            let speaker = self.speaker()?;
            speakers.push(catalog.insert_speaker(speaker).await);
        }

        for number in 1..=session_count {
            let session = self.session(number, &tags, &speakers)?;
            catalog.insert_session(session).await?;
            if number % 1000 == 0 {
                tracing::debug!(
                    target: "confcat::catalog",
                    "Generated {}/{} sessions",
                    number,
                    session_count
                );
            }
        }

        Ok(SeedReport {
            tags: tags.len(),
            speakers: speakers.len(),
            sessions: session_count,
            skipped: false,
        })
    }

    fn pick(&mut self, values: &[&'static str]) -> Result<&'static str> {
        values
            .choose(&mut self.rng)
            .copied()
            .ok_or_else(|| ConfcatError::internal("Cannot pick from an empty list"))
    }

    fn speaker(&mut self) -> Result<Speaker> {
        let first = self.pick(&FIRST_NAMES)?;
        let last = self.pick(&LAST_NAMES)?;
        let expertise = self.pick(&EXPERTISE)?;
        let years = self.rng.gen_range(2..20);

        let mut speaker = Speaker::new(format!("{} {}", first, last));
        speaker.bio = format!(
            "{} professional with {} years of industry experience.",
            expertise, years
        );
        Ok(speaker)
    }

    fn session(&mut self, number: usize, tags: &[Tag], speakers: &[Speaker]) -> Result<Session> {
        let title = format!(
            "Session {}: {} {}",
            number,
            self.pick(&TITLE_PREFIXES)?,
            self.pick(&TITLE_SUBJECTS)?
        );
        let start = self.anchor + Duration::days(self.rng.gen_range(-180..180));
        let end = start + Duration::hours(self.rng.gen_range(1..8));
        let location = self.pick(&LOCATIONS)?;

        let mut session = Session::new(title, location, start, end);
        session.description = self.pick(&DESCRIPTIONS)?.to_string();
        session.is_online = self.rng.gen_bool(0.5);

        let tag_count = self.rng.gen_range(1..=5);
        session.tags = tags
            .choose_multiple(&mut self.rng, tag_count)
            .cloned()
            .collect();
        let speaker_count = self.rng.gen_range(1..=3);
        session.speakers = speakers
            .choose_multiple(&mut self.rng, speaker_count)
            .cloned()
            .collect();

        Ok(session)
    }
}
