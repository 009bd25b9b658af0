use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use kaiwa::{
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    controls::{command_for, Command},
    runtime::{CrosstermEventSource, FixedTicker, QuizEvent, Runner},
    ui::QuizScreen,
    QuizError, QuizSession, QuizSettings, QuizState, Topic, TopicCatalog,
};
use log::info;
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
    process::ExitCode,
};

/// timed multiple-choice quizzes for spoken-language practice topics
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Pick a conversation topic and answer a timed multiple-choice quiz built from its questions. Every question offers the right answer among answers to other questions of the same topic."
)]
pub struct Cli {
    /// topic to play: its file name, id, or the start of its title (random if omitted)
    topic: Option<String>,

    /// number of questions per quiz
    #[clap(short = 'r', long, value_parser = clap::value_parser!(u32).range(1..=100))]
    rounds: Option<u32>,

    /// seconds to answer each question
    #[clap(short = 's', long, value_parser = clap::value_parser!(u32).range(1..=600))]
    seconds: Option<u32>,

    /// play a topic json file instead of one from the catalog
    #[clap(short = 't', long, conflicts_with = "topic")]
    topic_file: Option<PathBuf>,

    /// language of the hint shown under each question ("none" hides it)
    #[clap(long)]
    hint_lang: Option<String>,

    /// list available topics and exit
    #[clap(long)]
    list: bool,

    /// remember --rounds, --seconds and --hint-lang as the new defaults
    #[clap(long)]
    save_config: bool,

    /// seed the shuffle for a reproducible quiz
    #[clap(long)]
    seed: Option<u64>,
}

impl Cli {
    /// Apply command line overrides on top of the stored configuration
    fn merge_into(&self, mut config: Config) -> Config {
        if let Some(rounds) = self.rounds {
            config.rounds = rounds as usize;
        }
        if let Some(secs) = self.seconds {
            config.countdown_secs = secs;
        }
        if let Some(lang) = &self.hint_lang {
            config.hint_language = (lang != "none").then(|| lang.clone());
        }
        config
    }
}

#[derive(Debug)]
pub struct App {
    pub topic: Topic,
    pub settings: QuizSettings,
    pub hint_language: Option<String>,
    pub session: QuizSession,
    rng: StdRng,
}

impl App {
    pub fn new(
        topic: Topic,
        settings: QuizSettings,
        hint_language: Option<String>,
        mut rng: StdRng,
    ) -> Result<Self, QuizError> {
        let session = QuizSession::start(&topic, settings, &mut rng)?;
        Ok(Self {
            topic,
            settings,
            hint_language,
            session,
            rng,
        })
    }

    /// Throw the current session away and play the same topic again
    pub fn replay(&mut self) -> Result<(), QuizError> {
        self.session.close();
        self.session = QuizSession::start(&self.topic, self.settings, &mut self.rng)?;
        Ok(())
    }

    /// Apply a command; returns false when the app should exit
    pub fn apply(&mut self, command: Command) -> Result<bool, QuizError> {
        match command {
            Command::Choose(idx) => {
                self.session.choose(idx);
            }
            Command::Advance => {
                self.session.advance();
            }
            Command::Replay => {
                if self.session.state() == QuizState::Finished {
                    self.replay()?;
                }
            }
            Command::Quit => {
                self.session.close();
                return Ok(false);
            }
        }
        Ok(true)
    }
}

fn resolve_topic(cli: &Cli, config: &Config, rng: &mut StdRng) -> Result<Topic, QuizError> {
    if let Some(path) = &cli.topic_file {
        return Topic::from_path(path);
    }

    let catalog = load_catalog()?;
    match cli.topic.as_ref().or(config.default_topic.as_ref()) {
        Some(query) => catalog.find(query).cloned(),
        None => catalog
            .topics()
            .choose(rng)
            .cloned()
            .ok_or_else(|| QuizError::TopicNotFound("any topic".to_string())),
    }
}

fn load_catalog() -> Result<TopicCatalog, QuizError> {
    let catalog = TopicCatalog::bundled()?;
    Ok(match AppDirs::topics_dir() {
        Some(dir) => catalog.with_dir(&dir),
        None => catalog,
    })
}

fn print_topics() -> Result<(), QuizError> {
    for topic in load_catalog()?.topics() {
        println!("{:<12} {} ({} questions)", topic.slug, topic.title, topic.questions.len());
    }
    Ok(())
}

fn main() -> ExitCode {
    pretty_env_logger::init();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("kaiwa: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    if cli.list {
        print_topics()?;
        return Ok(());
    }

    let store = FileConfigStore::new();
    let config = cli.merge_into(store.load());
    if cli.save_config {
        store.save(&config)?;
        info!("saved defaults to {}", store.path().display());
    }

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let topic = resolve_topic(&cli, &config, &mut rng)?;
    let app = App::new(topic, config.quiz_settings(), config.hint_language.clone(), rng)?;

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = app;
    let result = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let mut runner = Runner::new(CrosstermEventSource::new(), FixedTicker::default());

    terminal.draw(|f| ui(app, f))?;

    loop {
        match runner.step() {
            QuizEvent::Tick => {
                if app.session.state() == QuizState::Playing {
                    app.session.tick();
                    terminal.draw(|f| ui(app, f))?;
                }
            }
            QuizEvent::Resize => {
                terminal.draw(|f| ui(app, f))?;
            }
            QuizEvent::Key(key) => {
                let Some(command) = command_for(key, app.session.state()) else {
                    continue;
                };

                let before = (app.session.state(), app.session.current_index());
                if !app.apply(command)? {
                    break;
                }
                let after = (app.session.state(), app.session.current_index());
                if after.0 == QuizState::Playing && after != before {
                    runner.rearm();
                }

                terminal.draw(|f| ui(app, f))?;
            }
        }
    }

    Ok(())
}

fn ui(app: &App, f: &mut Frame) {
    let view = app.session.view();
    let screen = QuizScreen::new(&view, app.hint_language.as_deref());
    f.render_widget(&screen, f.area());
}
