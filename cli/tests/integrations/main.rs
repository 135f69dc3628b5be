mod check;
mod repl;
mod run;
mod server;
