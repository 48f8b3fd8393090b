use tracing::debug;

use crate::cli::{ActivityArgs, ActivityCommand, Command, CoursesCommand, OpenArgs, ProfileCommand, SearchArgs};
use crate::error::{AppError, AppResult};
use crate::fetch::FetchState;
use crate::models::{ActivityRequest, LectureFilter, LectureSource, ProfileEdit, Track};
use crate::pages::checklist::ChecklistPage;
use crate::pages::home::HomePage;
use crate::pages::login::{self, LoginForm, SignupForm};
use crate::pages::mypage::MyPage;
use crate::pages::score_management::ScoreManagementPage;
use crate::pages::summary::SummaryPage;
use crate::pages::ActionOutcome;
use crate::router::{self, Resolution, Route};
use crate::state::AppState;
use crate::view;

/// Runs one command and returns what should be printed.
pub async fn run(state: &AppState, command: Command) -> AppResult<String> {
    match command {
        Command::Open(args) => open(state, &args).await,
        Command::Login { email, password } => {
            let password = match password {
                Some(p) => p,
                None => prompt_password("Password")?,
            };
            let form = LoginForm { email, password };
            match login::login(state, &form).await {
                Ok(resp) => Ok(format!(
                    "Logged in as {}\n",
                    resp.name.unwrap_or(resp.user_id)
                )),
                Err(e) => Err(AppError::Validation(login::login_error_message(&e))),
            }
        }
        Command::Signup {
            name,
            email,
            student_id,
            major,
        } => {
            let password = prompt_password("Password")?;
            let password_confirm = prompt_password("Confirm password")?;
            let form = SignupForm {
                name,
                email,
                password,
                password_confirm,
                student_id,
                major,
            };
            login::signup(state, &form).await?;
            Ok("Account created. You can log in now.\n".to_string())
        }
        Command::Logout => {
            login::logout(state)?;
            Ok("Logged out.\n".to_string())
        }
        Command::Whoami => {
            let probe = login::whoami(state).await?;
            Ok(match (probe.logged_in, probe.user_id) {
                (true, Some(id)) => format!("Logged in as {}\n", id),
                (true, None) => "Logged in.\n".to_string(),
                (false, _) => "Not logged in.\n".to_string(),
            })
        }
        Command::Courses(cmd) => {
            require(state, Route::ScoreManagement)?;
            courses(state, cmd).await
        }
        Command::Checklist { track, expand } => {
            require(state, Route::Checklist)?;
            checklist(state, track, expand).await
        }
        Command::Summary => {
            require(state, Route::Summary)?;
            summary(state).await
        }
        Command::Activity(cmd) => {
            require(state, Route::MyPage)?;
            activity(state, cmd).await
        }
        Command::Profile(cmd) => {
            require(state, Route::MyPage)?;
            profile(state, cmd).await
        }
    }
}

fn prompt_password(prompt: &str) -> AppResult<String> {
    dialoguer::Password::new()
        .with_prompt(prompt)
        .interact()
        .map_err(|e| AppError::Validation(format!("Could not read password: {}", e)))
}

/// Applies the route guard to commands that act on a protected page.
fn require(state: &AppState, route: Route) -> AppResult<()> {
    match router::resolve(route.path(), &state.session.current()) {
        Resolution::Redirect { from, .. } => Err(AppError::Validation(format!(
            "{} requires a login. Run `joluv login --email <email>` first.",
            from.path()
        ))),
        _ => Ok(()),
    }
}

async fn open(state: &AppState, args: &OpenArgs) -> AppResult<String> {
    let mut out = view::header(&state.session.current());
    out.push('\n');
    match router::resolve(&args.path, &state.session.current()) {
        Resolution::Render(route) => {
            debug!("rendering {}", route.path());
            out.push_str(&render_route(state, route, args).await?);
        }
        Resolution::Redirect { to, from } => {
            out.push_str(&format!(
                "{} requires a login; redirected to {}.\n\n",
                from.path(),
                to.path()
            ));
            out.push_str(&render_route(state, to, args).await?);
        }
        Resolution::NotFound(path) => {
            return Err(AppError::Validation(format!("No page at {}", path)));
        }
    }
    Ok(out)
}

async fn render_route(state: &AppState, route: Route, args: &OpenArgs) -> AppResult<String> {
    let mut out = format!("== {} ==\n", route.title());
    match route {
        Route::Home => {
            let page = HomePage::new(state);
            page.mount().await;
            out.push_str(&view::home(&page.view()));
        }
        Route::Login => out.push_str("Run `joluv login --email <email>` to log in.\n"),
        Route::Signup => out.push_str("Run `joluv signup --name <name> --email <email>` to sign up.\n"),
        Route::Checklist => out.push_str(&checklist(state, args.track, false).await?),
        Route::Summary => out.push_str(&summary(state).await?),
        Route::ScoreManagement => {
            let page = ScoreManagementPage::new(state);
            page.mount().await;
            out.push_str(&view::fetch_state(&page.credits.total(), view::total_credits));
            out.push_str(&view::fetch_state(&page.credits.each(), view::each_credits));
            out.push_str("\nMy courses\n");
            out.push_str(&view::fetch_state(&page.my_courses_page(args.page), view::course_table));
            out.push_str("\nLecture search\n");
            out.push_str(&view::fetch_state(&page.results_page(1), view::lecture_table));
        }
        Route::MyPage => {
            let page = MyPage::new(state.api.clone());
            page.mount().await;
            out.push_str(&view::fetch_state(&page.profile(), view::profile));
            out.push_str("\nGraduation checklist\n");
            out.push_str(&view::fetch_state(&page.checklist(), |rows| view::requirement_rows(rows)));
            out.push_str("\nCareer and activities\n");
            out.push_str(&view::fetch_state(&page.activities(), |list| view::activities(list)));
        }
    }
    Ok(out)
}

fn outcome_message(outcome: ActionOutcome, done: &str, unchanged: &str) -> String {
    match outcome {
        ActionOutcome::Done => format!("{}\n", done),
        ActionOutcome::Unchanged => format!("{}\n", unchanged),
        ActionOutcome::Busy => "Another request for this row is still running.\n".to_string(),
    }
}

/// Turns a failed load into an error so the command exits non-zero.
fn ready<T>(state: FetchState<T>) -> AppResult<T> {
    match state {
        FetchState::Ready(data) => Ok(data),
        FetchState::Failed(msg) => Err(AppError::Validation(msg)),
        FetchState::Idle | FetchState::Loading => {
            Err(AppError::Validation("The data did not finish loading.".to_string()))
        }
    }
}

async fn courses(state: &AppState, cmd: CoursesCommand) -> AppResult<String> {
    let page = ScoreManagementPage::new(state);
    match cmd {
        CoursesCommand::Mine { page: n } => {
            page.load_history().await;
            Ok(view::course_table(&ready(page.my_courses_page(n))?))
        }
        CoursesCommand::Search(args) => {
            let SearchArgs {
                grade,
                semester,
                keyword,
                standard,
                page: n,
            } = args;
            let filter = LectureFilter {
                grade,
                semester,
                keyword,
                source: if standard {
                    LectureSource::Standard
                } else {
                    LectureSource::List
                },
            };
            tokio::join!(page.load_history(), page.set_filter(filter));
            Ok(view::lecture_table(&ready(page.results_page(n))?))
        }
        CoursesCommand::Add { lecture_id, grade } => {
            page.load_history().await;
            let outcome = page.add_course(&lecture_id, grade).await?;
            Ok(outcome_message(
                outcome,
                &format!("Added {}.", lecture_id),
                &format!("{} is already in your courses.", lecture_id),
            ))
        }
        CoursesCommand::Remove { lecture_id } => {
            page.load_history().await;
            let outcome = page.remove_course(&lecture_id).await?;
            Ok(outcome_message(
                outcome,
                &format!("Removed {}.", lecture_id),
                &format!("{} is not in your courses.", lecture_id),
            ))
        }
        CoursesCommand::Grade { lecture_id, grade } => {
            page.load_history().await;
            let outcome = page.update_grade(&lecture_id, grade).await?;
            Ok(outcome_message(
                outcome,
                &format!("{} is now graded {}.", lecture_id, grade),
                "",
            ))
        }
    }
}

async fn checklist(state: &AppState, track: Track, expand: bool) -> AppResult<String> {
    let mut page = ChecklistPage::new(state.api.clone(), track);
    page.mount().await;
    if expand {
        page.expand_all();
    }
    let rows = ready(page.rows())?;
    Ok(format!(
        "Track: {}\n{}",
        page.track().label(),
        view::requirement_rows(&rows)
    ))
}

async fn summary(state: &AppState) -> AppResult<String> {
    let page = SummaryPage::new(state.api.clone());
    page.mount().await;
    Ok(view::summary(&ready(page.view())?))
}

fn activity_request(args: ActivityArgs) -> ActivityRequest {
    ActivityRequest {
        category: args.category,
        title: args.title,
        detail: args.detail,
        year: args.year,
    }
}

async fn activity(state: &AppState, cmd: ActivityCommand) -> AppResult<String> {
    let page = MyPage::new(state.api.clone());
    match cmd {
        ActivityCommand::List => {
            page.load_activities().await;
            Ok(view::activities(&ready(page.activities())?))
        }
        ActivityCommand::Add(args) => match page.add_activity(&activity_request(args)).await? {
            (ActionOutcome::Done, Some(created)) => {
                Ok(format!("Added activity {} ({}).\n", created.title, created.id))
            }
            (outcome, _) => Ok(outcome_message(outcome, "", "")),
        },
        ActivityCommand::Edit { id, fields } => {
            let outcome = page.edit_activity(&id, &activity_request(fields)).await?;
            Ok(outcome_message(outcome, &format!("Updated activity {}.", id), ""))
        }
        ActivityCommand::Delete { id } => {
            let outcome = page.delete_activity(&id).await?;
            Ok(outcome_message(outcome, &format!("Deleted activity {}.", id), ""))
        }
    }
}

async fn profile(state: &AppState, cmd: ProfileCommand) -> AppResult<String> {
    let page = MyPage::new(state.api.clone());
    page.load_profile().await;
    match cmd {
        ProfileCommand::Show => Ok(view::profile(&ready(page.profile())?)),
        ProfileCommand::Update {
            name,
            major,
            track,
            english_score,
            internship,
        } => {
            let edit = ProfileEdit {
                name,
                major,
                track,
                english_score,
                internship_flag: internship,
            };
            let saved = page.update_profile(&edit).await?;
            Ok(format!("Profile saved.\n{}", view::profile(&saved)))
        }
    }
}
