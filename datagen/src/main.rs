use anyhow::Result;
use clap::Parser;
use rand::prelude::*;
use rand::rngs::StdRng;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use talent_core::Profile;
use tracing_subscriber::{fmt, EnvFilter};

const SKILLS: &[&str] = &[
    "Python", "Java", "C++", "JavaScript", "SQL", "HTML", "CSS", "React.js", "Node.js",
    "Django", "Flask", "Machine Learning", "Deep Learning", "Data Analysis",
    "Artificial Intelligence", "Cloud Computing", "Cybersecurity", "DevOps",
    "Blockchain", "Docker", "Kubernetes", "TensorFlow", "PyTorch", "Scikit-learn",
    "Natural Language Processing", "Computer Vision", "Linux", "Networking",
    "Version Control (Git)", "Agile Development", "Database Design",
    "Big Data", "AWS", "Azure", "Google Cloud", "UI/UX Design",
    "Data Structures", "Algorithms", "System Design", "Web Development",
    "Mobile Development", "RESTful APIs", "GraphQL", "Software Testing",
];

const TITLES: &[&str] = &[
    "Web Developer", "Data Analyst", "Software Engineer", "DevOps Engineer",
    "Data Scientist", "Backend Developer", "Frontend Developer", "Cloud Architect",
    "Machine Learning Engineer", "Security Analyst", "Database Administrator",
    "Senior Software Engineer", "Senior Data Analyst", "QA Engineer",
];

const CITIES: &[&str] = &[
    "New York", "San Francisco", "Austin", "Seattle", "Chicago", "Boston",
    "London", "Berlin", "Amsterdam", "Toronto", "Bangalore", "Singapore",
];

const FIRST_NAMES: &[&str] = &[
    "James", "Mary", "Robert", "Patricia", "John", "Jennifer", "Michael", "Linda",
    "David", "Elizabeth", "William", "Barbara", "Richard", "Susan", "Joseph",
    "Jessica", "Thomas", "Sarah", "Amara", "Wei", "Priya", "Diego", "Yuki", "Fatima",
];

const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis",
    "Rodriguez", "Martinez", "Hernandez", "Lopez", "Gonzalez", "Wilson", "Anderson",
    "Chen", "Patel", "Tanaka", "Okafor", "Kim", "Nguyen", "Singh", "Kowalski",
];

#[derive(Parser)]
#[command(name = "talent-datagen")]
#[command(about = "Generate a synthetic candidate-profile corpus", long_about = None)]
struct Args {
    /// Number of profiles to generate
    #[arg(long, default_value_t = 1000)]
    count: usize,
    /// Output file (JSONL, one profile per line)
    #[arg(long, default_value = "./data/profiles.jsonl")]
    output: PathBuf,
    /// RNG seed for reproducible corpora
    #[arg(long)]
    seed: Option<u64>,
}

fn generate(rng: &mut StdRng) -> Profile {
    let first = FIRST_NAMES.choose(rng).unwrap();
    let last = LAST_NAMES.choose(rng).unwrap();
    let full_name = format!("{first} {last}");

    let num_skills = rng.random_range(3..=7);
    let skills: Vec<&str> = SKILLS.choose_multiple(rng, num_skills).copied().collect();

    // A few records miss contact details, like real-world exports do.
    let email = (rng.random_range(0..100) >= 5).then(|| {
        format!("{}.{}@example.com", first.to_lowercase(), last.to_lowercase())
    });
    let phone = (rng.random_range(0..100) >= 2)
        .then(|| format!("+1-555-{:04}", rng.random_range(0..10_000)));

    let current_salary = rng.random_range(30_000..=150_000) as f64;
    let expected_salary = current_salary + rng.random_range(0..=50_000) as f64;

    Profile {
        full_name,
        city: CITIES.choose(rng).unwrap().to_string(),
        professional_title: TITLES.choose(rng).unwrap().to_string(),
        skills: skills.join(", "),
        current_salary,
        expected_salary,
        email,
        phone,
    }
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    if let Some(parent) = args.output.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut out = BufWriter::new(File::create(&args.output)?);
    for _ in 0..args.count {
        let profile = generate(&mut rng);
        serde_json::to_writer(&mut out, &profile)?;
        out.write_all(b"\n")?;
    }
    out.flush()?;

    tracing::info!(count = args.count, output = %args.output.display(), "corpus written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_profiles_have_well_formed_skill_lists() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            let p = generate(&mut rng);
            let skills: Vec<&str> = p.skill_list().collect();
            assert!((3..=7).contains(&skills.len()));
            assert!(skills.iter().all(|s| !s.is_empty()));
            assert!(p.expected_salary >= p.current_salary);
        }
    }

    #[test]
    fn same_seed_generates_the_same_corpus() {
        let mut a = StdRng::seed_from_u64(7);
        let mut b = StdRng::seed_from_u64(7);
        let pa = generate(&mut a);
        let pb = generate(&mut b);
        assert_eq!(pa.full_name, pb.full_name);
        assert_eq!(pa.skills, pb.skills);
    }
}
