// src/main.rs
//! cvforge: resume and cover letter studio CLI

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use cv_studio::assist::prompts::{DEFAULT_TARGET_ROLE, REWRITE_CONSTRAINTS};
use cv_studio::assist::{AssistService, ModelClient};
use cv_studio::render::preview::{build_preview, Column};
use cv_studio::render::{date_range, docx, html, markdown, TemplateId};
use cv_studio::store::{backup_file_name, export_file_name, write_export};
use cv_studio::studio::StudioView;
use cv_studio::types::{
    CareerProfile, Certification, Conference, EducationItem, ExperienceItem, JobBrief, LetterTone,
    Project, Publication, RewriteTone,
};
use cv_studio::{AssistOp, AssistTarget, ConfigManager, ProfileEdit, ProfileStore, Studio};

#[derive(Parser)]
#[command(name = "cvforge")]
#[command(about = "Build, enhance and export a resume from the command line")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the starter profile into the slot
    Init {
        /// Overwrite an existing profile
        #[arg(long)]
        force: bool,
    },

    /// Print the current profile
    Show {
        /// Render as Markdown instead of the field listing
        #[arg(long)]
        markdown: bool,
    },

    /// Set a basics field or the summary
    Set {
        /// Field to set (name, title, location, email, phone, summary)
        field: String,

        /// New value
        value: String,
    },

    /// Add a profile item
    Add {
        #[command(subcommand)]
        command: AddCommands,
    },

    /// Remove a profile item
    Remove {
        #[command(subcommand)]
        command: RemoveCommands,
    },

    /// Show how a template lays the current profile out
    Template {
        /// Template id (modern, classic, minimal, creative)
        id: String,
    },

    /// Parse a resume text file and replace the profile with the result
    Import {
        /// Path to a plain-text resume
        file: PathBuf,
    },

    /// Store LinkedIn activity as context for rewrites
    Linkedin {
        /// Path to a text file of posts and activity
        file: PathBuf,

        /// Also extract skill groups and projects into the profile
        #[arg(long)]
        extract: bool,
    },

    /// Rewrite one section through the text service
    Enhance {
        /// Section to rewrite (summary, or highlight:<experience-id>:<highlight-id>)
        #[arg(short, long)]
        section: String,

        /// Role to slant the rewrite toward
        #[arg(long, default_value = DEFAULT_TARGET_ROLE)]
        role: String,

        /// Voice (modern, executive, startup, technical)
        #[arg(long, default_value = "modern")]
        tone: String,
    },

    /// Analyze a job description into a brief
    Analyze {
        /// Path to the job description text
        file: PathBuf,
    },

    /// Draft a cover letter for a job description
    Letter {
        /// Path to the job description text
        file: PathBuf,

        /// Tone (professional, relaxed, corporate, light hearted, technical,
        /// founder, formal, punchy)
        #[arg(long, default_value = "professional")]
        tone: String,

        /// Write the letter here instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Export the profile
    Export {
        /// Output format (json, markdown, docx, html)
        format: String,

        /// Template for the HTML export
        #[arg(long, default_value = "modern")]
        template: String,

        /// Directory to write into (defaults to the configured export dir)
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum AddCommands {
    /// Add an experience entry
    Experience {
        company: String,
        role: String,

        #[arg(long, default_value = "")]
        start: String,

        #[arg(long, default_value = "")]
        end: String,

        #[arg(long, default_value = "")]
        location: String,
    },

    /// Add a highlight under an experience entry
    Highlight {
        /// Experience id
        experience_id: String,

        /// Highlight text
        text: String,
    },

    /// Add a skill group
    SkillGroup {
        /// Group name
        name: String,

        /// Comma-separated skills
        items: String,
    },

    /// Add an education entry
    Education {
        institution: String,
        degree: String,

        #[arg(long, default_value = "")]
        year: String,
    },

    /// Add a project
    Project {
        name: String,

        #[arg(long, default_value = "")]
        description: String,

        #[arg(long)]
        url: Option<String>,
    },

    /// Add a certification
    Certification {
        name: String,
        issuer: String,

        #[arg(long, default_value = "")]
        date: String,
    },

    /// Add a publication
    Publication {
        title: String,
        publisher: String,

        #[arg(long, default_value = "")]
        date: String,

        #[arg(long)]
        url: Option<String>,
    },

    /// Add a conference entry
    Conference {
        name: String,
        event: String,

        #[arg(long, default_value = "")]
        date: String,
    },

    /// Add a contact link
    Link { label: String, url: String },
}

#[derive(Subcommand)]
enum RemoveCommands {
    /// Remove an experience entry by id
    Experience { id: String },

    /// Remove a highlight by id
    Highlight {
        experience_id: String,
        highlight_id: String,
    },

    /// Remove a skill group by name
    SkillGroup { name: String },

    /// Remove an education entry by id
    Education { id: String },

    /// Remove a project by id
    Project { id: String },

    /// Remove a certification by id
    Certification { id: String },

    /// Remove a publication by id
    Publication { id: String },

    /// Remove a conference entry by id
    Conference { id: String },

    /// Remove a contact link by label
    Link { label: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = ConfigManager::load()?;
    config.ensure_directories().await?;
    let store = ProfileStore::new(&config.storage.data_dir);

    match cli.command {
        Commands::Init { force } => {
            if store.slot_path().exists() && !force {
                bail!(
                    "Profile already exists at {} (use --force to overwrite)",
                    store.slot_path().display()
                );
            }
            let profile = CareerProfile::starter();
            store.save(&profile).await?;
            println!(
                "Initialized profile for {} at {}",
                profile.basics.name,
                store.slot_path().display()
            );
        }

        Commands::Show { markdown } => {
            let profile = store.load_or_default().await;
            if markdown {
                print!("{}", markdown::render_markdown(&profile));
            } else {
                print_profile(&profile);
            }
        }

        Commands::Set { field, value } => {
            let mut studio = Studio::new(store.load_or_default().await);
            let edit = match field.as_str() {
                "name" => ProfileEdit::SetName(value),
                "title" => ProfileEdit::SetTitle(value),
                "location" => ProfileEdit::SetLocation(value),
                "email" => ProfileEdit::SetEmail(value),
                "phone" => ProfileEdit::SetPhone(value),
                "summary" => ProfileEdit::SetSummary(value),
                other => bail!(
                    "unknown field '{}' (name, title, location, email, phone, summary)",
                    other
                ),
            };
            studio.apply_edit(edit);
            store.save(studio.current()).await?;
            println!("Updated {}.", field);
        }

        Commands::Add { command } => {
            let mut studio = Studio::new(store.load_or_default().await);
            let message = apply_add(&mut studio, command);
            store.save(studio.current()).await?;
            println!("{}", message);
        }

        Commands::Remove { command } => {
            let mut studio = Studio::new(store.load_or_default().await);
            let message = apply_remove(&mut studio, command);
            store.save(studio.current()).await?;
            println!("{}", message);
        }

        Commands::Template { id } => {
            let template: TemplateId = id.parse()?;
            let mut studio = Studio::new(store.load_or_default().await);
            studio.set_template(template);
            let doc = build_preview(studio.current(), studio.template());
            println!("Template '{}' renders:", template);
            for region in &doc.regions {
                let column = match region.column {
                    Column::Full => "full width",
                    Column::Main => "main column",
                    Column::Side => "side column",
                };
                println!("  {}:", column);
                for block in &region.sections {
                    match &block.label {
                        Some(label) => println!("    {}", label),
                        None => println!("    {:?} (no heading)", block.section),
                    }
                }
            }
        }

        Commands::Import { file } => {
            let text = tokio::fs::read_to_string(&file)
                .await
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let service = assist_service(&config)?;
            info!("Parsing resume text ({} chars)", text.len());
            let draft = service.parse_resume(&text).await;
            let mut studio = Studio::new(store.load_or_default().await);
            studio.import_resume(draft);
            store.save(studio.current()).await?;
            println!(
                "Imported {} as the profile for {}.",
                file.display(),
                studio.current().basics.name
            );
        }

        Commands::Linkedin { file, extract } => {
            let text = tokio::fs::read_to_string(&file)
                .await
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let mut studio = Studio::new(store.load_or_default().await);
            if extract {
                let service = assist_service(&config)?;
                info!("Extracting LinkedIn insights ({} chars)", text.len());
                let insights = service.linkedin_insights(&text).await;
                let skills = insights.skills.len();
                let projects = insights.projects.len();
                studio.merge_linkedin_insights(text, insights);
                println!(
                    "Saved LinkedIn context; added {} skill group(s) and {} project(s).",
                    skills, projects
                );
            } else {
                studio.save_linkedin_context(text);
                println!("Saved LinkedIn context.");
            }
            store.save(studio.current()).await?;
        }

        Commands::Enhance {
            section,
            role,
            tone,
        } => {
            let tone: RewriteTone = tone.parse()?;
            let mut studio = Studio::new(store.load_or_default().await);
            let target = parse_rewrite_target(&section)?;
            let ticket = studio.begin_assist(AssistOp::Rewrite, target)?;
            let text = match studio.target_text(ticket.target()) {
                Some(text) => text.to_string(),
                None => bail!("no such section: {}", section),
            };
            let extra_context = studio.current().linkedin_context.clone();

            let service = assist_service(&config)?;
            info!("Rewriting {} as {} ({})", section, role, tone);
            let rewritten = service
                .rewrite_section(&text, &role, tone, &REWRITE_CONSTRAINTS, extra_context.as_deref())
                .await;
            info!("Rewrite finished ({} chars)", rewritten.len());

            if studio.apply_rewrite(&ticket, rewritten) {
                store.save(studio.current()).await?;
                println!("Updated {}.", section);
            }
        }

        Commands::Analyze { file } => {
            let text = tokio::fs::read_to_string(&file)
                .await
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let service = assist_service(&config)?;
            info!("Analyzing job description ({} chars)", text.len());
            let analysis = service.analyze_job(&text).await;
            let brief = JobBrief::from_analysis(analysis, text, LetterTone::default());
            println!("Role:      {}", brief.role_title);
            println!("Company:   {}", brief.company_name);
            println!("Seniority: {}", brief.seniority);
            if !brief.extracted_keywords.is_empty() {
                println!("Keywords:  {}", brief.extracted_keywords.join(", "));
            }
        }

        Commands::Letter { file, tone, out } => {
            let tone: LetterTone = tone.parse()?;
            let text = tokio::fs::read_to_string(&file)
                .await
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let mut studio = Studio::new(store.load_or_default().await);
            studio.set_view(StudioView::CoverLetter);

            let service = assist_service(&config)?;
            info!("Analyzing job description ({} chars)", text.len());
            let analysis = service.analyze_job(&text).await;
            let brief = JobBrief::from_analysis(analysis, text, tone);
            println!("Drafting letter for {} at {}...", brief.role_title, brief.company_name);
            studio.set_job_brief(brief);

            let ticket = studio.begin_assist(AssistOp::Letter, AssistTarget::Letter)?;
            let brief = studio.job_brief().cloned().context("job brief missing")?;
            info!("Drafting letter for {} ({})", brief.company_name, brief.tone);
            let letter = service.draft_letter(studio.current(), &brief).await;
            info!("Letter finished ({} chars)", letter.len());
            if !studio.apply_letter(&ticket, letter) {
                bail!("letter response was discarded");
            }

            let letter = studio.letter().context("no letter drafted")?;
            match out {
                Some(path) => {
                    tokio::fs::write(&path, letter)
                        .await
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    println!("Letter written to {}", path.display());
                }
                None => println!("\n{}", letter),
            }
        }

        Commands::Export {
            format,
            template,
            out_dir,
        } => {
            let profile = store.load_or_default().await;
            let dir = out_dir.unwrap_or_else(|| config.storage.export_dir.clone());
            let (file_name, bytes) = match format.as_str() {
                "json" => {
                    let body = serde_json::to_string_pretty(&profile)
                        .context("Failed to serialize profile")?;
                    let name = backup_file_name(chrono::Local::now().date_naive());
                    (name, body.into_bytes())
                }
                "markdown" | "md" => (
                    export_file_name(&profile.basics.name, "md"),
                    markdown::render_markdown(&profile).into_bytes(),
                ),
                "html" => {
                    let template: TemplateId = template.parse()?;
                    (
                        export_file_name(&profile.basics.name, "html"),
                        html::render_html(&profile, template).into_bytes(),
                    )
                }
                "docx" => {
                    let name = export_file_name(&profile.basics.name, "docx");
                    let packed = tokio::task::spawn_blocking(move || docx::render_docx(&profile))
                        .await
                        .context("DOCX packing task failed")??;
                    (name, packed)
                }
                other => bail!("unknown export format '{}' (json, markdown, docx, html)", other),
            };
            let path = write_export(&dir, &file_name, &bytes).await?;
            println!("Exported {}", path.display());
        }
    }

    Ok(())
}

fn assist_service(config: &ConfigManager) -> Result<AssistService> {
    let client = ModelClient::new(
        config.service.endpoint.clone(),
        config.service.api_key.clone(),
        config.service.model.clone(),
    )?;
    Ok(AssistService::new(Arc::new(client)))
}

fn parse_rewrite_target(section: &str) -> Result<AssistTarget> {
    if section == "summary" {
        return Ok(AssistTarget::Summary);
    }
    if let Some(rest) = section.strip_prefix("highlight:") {
        if let Some((experience_id, highlight_id)) = rest.split_once(':') {
            return Ok(AssistTarget::Highlight {
                experience_id: experience_id.to_string(),
                highlight_id: highlight_id.to_string(),
            });
        }
    }
    bail!(
        "unknown section '{}' (summary, or highlight:<experience-id>:<highlight-id>)",
        section
    )
}

fn apply_add(studio: &mut Studio, command: AddCommands) -> String {
    match command {
        AddCommands::Experience {
            company,
            role,
            start,
            end,
            location,
        } => {
            let mut item = ExperienceItem::new();
            item.company = company;
            item.role = role;
            item.start_date = start;
            item.end_date = end;
            item.location = location;
            let id = item.id.clone();
            studio.apply_edit(ProfileEdit::AddExperience(item));
            format!("Added experience {}", id)
        }
        AddCommands::Highlight {
            experience_id,
            text,
        } => {
            studio.apply_edit(ProfileEdit::AddHighlight {
                experience_id: experience_id.clone(),
                text,
            });
            format!("Added highlight under {}", experience_id)
        }
        AddCommands::SkillGroup { name, items } => {
            let items: Vec<String> = items
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
            let count = items.len();
            studio.apply_edit(ProfileEdit::AddSkillGroup {
                name: name.clone(),
                items,
            });
            format!("Added skill group '{}' with {} item(s)", name, count)
        }
        AddCommands::Education {
            institution,
            degree,
            year,
        } => {
            let mut item = EducationItem::new();
            item.institution = institution;
            item.degree = degree;
            item.year = year;
            let id = item.id.clone();
            studio.apply_edit(ProfileEdit::AddEducation(item));
            format!("Added education {}", id)
        }
        AddCommands::Project {
            name,
            description,
            url,
        } => {
            let mut project = Project::new(name);
            project.description = description;
            project.url = url;
            let id = project.id.clone();
            studio.apply_edit(ProfileEdit::AddProject(project));
            format!("Added project {}", id)
        }
        AddCommands::Certification { name, issuer, date } => {
            let mut cert = Certification::new();
            cert.name = name;
            cert.issuer = issuer;
            cert.date = date;
            let id = cert.id.clone();
            studio.apply_edit(ProfileEdit::AddCertification(cert));
            format!("Added certification {}", id)
        }
        AddCommands::Publication {
            title,
            publisher,
            date,
            url,
        } => {
            let mut publication = Publication::new();
            publication.title = title;
            publication.publisher = publisher;
            publication.date = date;
            publication.url = url;
            let id = publication.id.clone();
            studio.apply_edit(ProfileEdit::AddPublication(publication));
            format!("Added publication {}", id)
        }
        AddCommands::Conference { name, event, date } => {
            let mut conference = Conference::new();
            conference.name = name;
            conference.event = event;
            conference.date = date;
            let id = conference.id.clone();
            studio.apply_edit(ProfileEdit::AddConference(conference));
            format!("Added conference {}", id)
        }
        AddCommands::Link { label, url } => {
            studio.apply_edit(ProfileEdit::AddLink {
                label: label.clone(),
                url,
            });
            format!("Added link '{}'", label)
        }
    }
}

fn apply_remove(studio: &mut Studio, command: RemoveCommands) -> String {
    match command {
        RemoveCommands::Experience { id } => {
            studio.apply_edit(ProfileEdit::RemoveExperience { id: id.clone() });
            format!("Removed experience {}", id)
        }
        RemoveCommands::Highlight {
            experience_id,
            highlight_id,
        } => {
            studio.apply_edit(ProfileEdit::RemoveHighlight {
                experience_id,
                highlight_id: highlight_id.clone(),
            });
            format!("Removed highlight {}", highlight_id)
        }
        RemoveCommands::SkillGroup { name } => {
            studio.apply_edit(ProfileEdit::RemoveSkillGroup { name: name.clone() });
            format!("Removed skill group '{}'", name)
        }
        RemoveCommands::Education { id } => {
            studio.apply_edit(ProfileEdit::RemoveEducation { id: id.clone() });
            format!("Removed education {}", id)
        }
        RemoveCommands::Project { id } => {
            studio.apply_edit(ProfileEdit::RemoveProject { id: id.clone() });
            format!("Removed project {}", id)
        }
        RemoveCommands::Certification { id } => {
            studio.apply_edit(ProfileEdit::RemoveCertification { id: id.clone() });
            format!("Removed certification {}", id)
        }
        RemoveCommands::Publication { id } => {
            studio.apply_edit(ProfileEdit::RemovePublication { id: id.clone() });
            format!("Removed publication {}", id)
        }
        RemoveCommands::Conference { id } => {
            studio.apply_edit(ProfileEdit::RemoveConference { id: id.clone() });
            format!("Removed conference {}", id)
        }
        RemoveCommands::Link { label } => {
            studio.apply_edit(ProfileEdit::RemoveLink { label: label.clone() });
            format!("Removed link '{}'", label)
        }
    }
}

fn print_profile(profile: &CareerProfile) {
    println!("{}", profile.basics.name);
    println!("{}", profile.basics.title);
    println!(
        "{} | {} | {}",
        profile.basics.location, profile.basics.email, profile.basics.phone
    );
    for link in &profile.basics.links {
        println!("{}: {}", link.label, link.url);
    }

    if !profile.summary.trim().is_empty() {
        println!("\nSummary:\n{}", profile.summary);
    }

    if !profile.experience.is_empty() {
        println!("\nExperience:");
        for exp in &profile.experience {
            println!(
                "  [{}] {} at {} ({}) {}",
                exp.id,
                exp.role,
                exp.company,
                date_range(exp),
                exp.location
            );
            for hl in &exp.highlights {
                println!("    [{}] {}", hl.id, hl.text);
            }
        }
    }

    if !profile.education.is_empty() {
        println!("\nEducation:");
        for edu in &profile.education {
            println!(
                "  [{}] {}, {} ({})",
                edu.id, edu.degree, edu.institution, edu.year
            );
        }
    }

    if !profile.skills.is_empty() {
        println!("\nSkills:");
        for group in &profile.skills {
            println!("  {}: {}", group.name, group.items.join(", "));
        }
    }

    if !profile.projects.is_empty() {
        println!("\nProjects:");
        for project in &profile.projects {
            println!("  [{}] {}: {}", project.id, project.name, project.description);
        }
    }

    if !profile.certifications.is_empty() {
        println!("\nCertifications:");
        for cert in &profile.certifications {
            println!("  [{}] {} ({}, {})", cert.id, cert.name, cert.issuer, cert.date);
        }
    }

    if !profile.publications.is_empty() {
        println!("\nPublications:");
        for publication in &profile.publications {
            println!(
                "  [{}] {} ({}, {})",
                publication.id, publication.title, publication.publisher, publication.date
            );
        }
    }

    if !profile.conferences.is_empty() {
        println!("\nConferences:");
        for conference in &profile.conferences {
            println!(
                "  [{}] {} ({}, {})",
                conference.id, conference.name, conference.event, conference.date
            );
        }
    }

    if profile.linkedin_context.is_some() {
        println!("\nLinkedIn context: captured");
    }
}
