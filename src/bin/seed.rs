use job_tracker_backend::{
    config::init_config,
    database::pool::create_pool,
    models::application::{ApplicationStatus, NewApplication},
    services::application_service::ApplicationService,
};
use tracing::info;

/// Clears the applications table and inserts a demo pipeline so the board
/// and dashboard have something to show.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    init_config()?;

    let pool = create_pool().await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    sqlx::query("DELETE FROM applications").execute(&pool).await?;
    info!("Cleared existing applications");

    let service = ApplicationService::new(pool.clone());
    let applications = demo_applications();
    let total = applications.len();
    for application in applications {
        let created = service.insert(application).await?;
        info!("Seeded {} ({})", created.candidate_name, created.status);
    }
    info!("Created {} demo applications", total);

    let status_counts: Vec<(String, i64)> =
        sqlx::query_as("SELECT status, COUNT(*) FROM applications GROUP BY status ORDER BY status")
            .fetch_all(&pool)
            .await?;
    info!("Application status summary:");
    for (status, count) in status_counts {
        info!("  {}: {}", status, count);
    }

    Ok(())
}

fn demo(
    candidate_name: &str,
    role: &str,
    years_of_experience: f64,
    resume_link: &str,
    email: &str,
    phone: &str,
    notes: &str,
    status: ApplicationStatus,
) -> NewApplication {
    NewApplication {
        candidate_name: candidate_name.to_string(),
        role: role.to_string(),
        years_of_experience,
        resume_link: resume_link.to_string(),
        status,
        email: Some(email.to_string()),
        phone: Some(phone.to_string()),
        notes: notes.to_string(),
    }
}

fn demo_applications() -> Vec<NewApplication> {
    vec![
        demo(
            "Arjun Sharma",
            "Frontend Developer",
            3.0,
            "https://linkedin.com/in/arjun-sharma-dev",
            "arjun.sharma@gmail.com",
            "+91-9876543210",
            "Expert in React.js and Next.js. Built 5+ e-commerce platforms.",
            ApplicationStatus::Applied,
        ),
        demo(
            "Priya Patel",
            "UI/UX Designer",
            4.0,
            "https://behance.net/priya-patel",
            "priya.patel@design.com",
            "+91-8765432109",
            "Award-winning designer. Strong in Figma and Adobe Suite.",
            ApplicationStatus::Applied,
        ),
        demo(
            "Rohit Kumar",
            "Data Scientist",
            2.0,
            "https://github.com/rohit-kumar-ds",
            "rohit.kumar@analytics.com",
            "+91-7654321098",
            "Machine Learning specialist. Expert in Python and TensorFlow.",
            ApplicationStatus::Applied,
        ),
        demo(
            "Sneha Reddy",
            "Backend Developer",
            5.0,
            "https://portfolio.sneha-reddy.dev",
            "sneha.reddy@backend.com",
            "+91-6543210987",
            "Microservices architect. Scaled applications to 1M+ users.",
            ApplicationStatus::Applied,
        ),
        demo(
            "Vikash Singh",
            "Full Stack Developer",
            6.0,
            "https://vikash-singh.portfolio.dev",
            "vikash.singh@fullstack.com",
            "+91-5432109876",
            "MERN stack expert. Strong system design skills.",
            ApplicationStatus::Interview,
        ),
        demo(
            "Ananya Iyer",
            "DevOps Engineer",
            5.0,
            "https://gitlab.com/ananya-iyer",
            "ananya.iyer@cloudops.com",
            "+91-4321098765",
            "Kubernetes and Terraform specialist. AWS and GCP certified.",
            ApplicationStatus::Interview,
        ),
        demo(
            "Karan Mehta",
            "Backend Developer",
            7.0,
            "https://karan-mehta.dev",
            "karan.mehta@systems.com",
            "+91-3210987654",
            "Distributed systems background. Led a payments platform team.",
            ApplicationStatus::Offer,
        ),
        demo(
            "Nisha Gupta",
            "QA Engineer",
            3.0,
            "https://linkedin.com/in/nisha-gupta-qa",
            "nisha.gupta@testing.com",
            "+91-2109876543",
            "Automation-first tester. Cypress and Playwright.",
            ApplicationStatus::Rejected,
        ),
        demo(
            "Deepika Choudhary",
            "Tech Lead",
            8.0,
            "https://deepika-tech-lead.dev",
            "deepika.c@techlead.com",
            "+91-9988776655",
            "Exceptional leadership skills. Team of 15 developers.",
            ApplicationStatus::Hired,
        ),
        demo(
            "Manish Verma",
            "AI Engineer",
            4.0,
            "https://manish-ai.research.com",
            "manish.verma@ai.com",
            "+91-8877665544",
            "PhD in AI from IISc. Built recommendation systems.",
            ApplicationStatus::Hired,
        ),
    ]
}
