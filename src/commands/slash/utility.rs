use serenity::builder::CreateApplicationCommand;

pub fn create_commands() -> Vec<CreateApplicationCommand> {
    let mut ping = CreateApplicationCommand::default();
    ping.name("ping").description("Test bot responsiveness");

    let mut help = CreateApplicationCommand::default();
    help.name("help").description("Show available commands");

    vec![ping, help]
}
