//! tangoagenda-client CLI entry point.

use clap::Parser;
use tangoagenda_client::cli::agenda::AgendaAction;
use tangoagenda_client::cli::events::EventsAction;
use tangoagenda_client::cli::health::HealthAction;
use tangoagenda_client::cli::teachers::TeachersAction;
use tangoagenda_client::cli::{Cli, Commands};
use tangoagenda_client::client::events::ListEventsQuery;
use tangoagenda_client::output::{pretty, print};
use tangoagenda_client::TangoAgendaClient;
use tangoagenda_core::agenda::{CreateTeacherRequest, UpdateTeacherRequest};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = TangoAgendaClient::new(&cli.base_url);
    let format = cli.format;

    match cli.command {
        Commands::Agenda(agenda_cmd) => match agenda_cmd.action {
            AgendaAction::List { start, end } => {
                let page = client.agenda(start, end).await?;
                print(&page, format, pretty::format_agenda);
            }
            AgendaAction::Get { id } => {
                let occurrence = client.agenda_event(&id).await?;
                print(&occurrence, format, pretty::format_occurrence);
            }
        },
        Commands::Events(events_cmd) => match events_cmd.action {
            EventsAction::List {
                recurring,
                offset,
                limit,
            } => {
                let page = client
                    .list_events(ListEventsQuery {
                        recurring,
                        offset,
                        limit,
                    })
                    .await?;
                print(&page, format, pretty::format_event_page);
            }
            EventsAction::Weekly => {
                let groups = client.recurring_by_weekday().await?;
                print(&groups, format, |g| pretty::format_weekday_groups(g));
            }
            EventsAction::Create(args) => {
                let event = client.create_event(&args.into_request()).await?;
                print(&event, format, |e| {
                    format!("Created:\n{}", pretty::format_event(e))
                });
            }
            EventsAction::Get { id } => {
                let event = client.get_event(&id).await?;
                print(&event, format, pretty::format_event);
            }
            EventsAction::Update(args) => {
                let (id, req) = args.into_request();
                let event = client.update_event(&id, &req).await?;
                print(&event, format, |e| {
                    format!("Updated:\n{}", pretty::format_event(e))
                });
            }
            EventsAction::Toggle { id } => {
                let event = client.toggle_event(&id).await?;
                print(&event, format, |e| {
                    format!("Toggled:\n{}", pretty::format_event(e))
                });
            }
            EventsAction::Delete { id } => {
                client.delete_event(&id).await?;
                if !cli.quiet {
                    println!("Deleted event {}", id);
                }
            }
        },
        Commands::Teachers(teachers_cmd) => match teachers_cmd.action {
            TeachersAction::List => {
                let teachers = client.list_teachers().await?;
                print(&teachers, format, |t| pretty::format_teachers(t));
            }
            TeachersAction::Create {
                name,
                nickname,
                phone,
            } => {
                let mut req = CreateTeacherRequest::new(name);
                req.nickname = nickname;
                req.phone_number = phone;
                let teacher = client.create_teacher(&req).await?;
                print(&teacher, format, |t| {
                    format!("Created:\n{}", pretty::format_teacher(t))
                });
            }
            TeachersAction::Get { id } => {
                let teacher = client.get_teacher(&id).await?;
                print(&teacher, format, pretty::format_teacher);
            }
            TeachersAction::Update {
                id,
                name,
                nickname,
                phone,
                bio,
            } => {
                let req = UpdateTeacherRequest {
                    name,
                    nickname,
                    phone_number: phone,
                    bio,
                    ..UpdateTeacherRequest::default()
                };
                let teacher = client.update_teacher(&id, &req).await?;
                print(&teacher, format, |t| {
                    format!("Updated:\n{}", pretty::format_teacher(t))
                });
            }
            TeachersAction::Delete { id } => {
                client.delete_teacher(&id).await?;
                if !cli.quiet {
                    println!("Deleted teacher {}", id);
                }
            }
        },
        Commands::Health(health_cmd) => match health_cmd.action {
            HealthAction::Live => {
                client.livez().await?;
                if !cli.quiet {
                    println!("Server is live");
                }
            }
            HealthAction::Ready => {
                let health = client.healthz().await?;
                print(&health, format, pretty::format_health);
            }
        },
    }

    Ok(())
}
