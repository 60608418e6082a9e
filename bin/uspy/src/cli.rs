use clap::{Args, Parser, Subcommand};
use uspy_model::SubjectKey;
use uspy_review::ReviewChoice;

#[derive(Parser, Debug)]
#[command(version, about = "Browse and review USP subjects", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show a subject page
    Subject {
        #[command(flatten)]
        subject: SubjectArgs,

        /// Apply each response as soon as it arrives instead of waiting for all of them
        #[arg(long)]
        stream: bool,
    },

    /// Answer "Vale a pena?" for a subject
    Review {
        #[command(flatten)]
        subject: SubjectArgs,

        /// S/sim/yes or N/não/no
        #[arg(value_parser = parse_choice)]
        answer: ReviewChoice,
    },

    /// Print the logged in user
    Whoami,

    /// Log in and print the session to reuse through USPY_SESSION
    Login {
        /// USP number
        login: String,

        #[arg(short, long)]
        password: String,
    },

    /// Ask for a password redefinition email
    ResetPassword { email: String },
}

#[derive(Args, Debug)]
pub struct SubjectArgs {
    /// Course code, e.g. 45052
    pub course: String,
    /// Course specialization, e.g. 0
    pub specialization: String,
    /// Subject code, e.g. SCC0218
    pub code: String,
}

impl SubjectArgs {
    pub fn key(&self) -> SubjectKey {
        SubjectKey::new(&self.course, &self.specialization, &self.code)
    }
}

fn parse_choice(input: &str) -> Result<ReviewChoice, String> {
    ReviewChoice::parse(input).ok_or_else(|| format!("expected S or N, got {input:?}"))
}
