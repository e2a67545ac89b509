/// Every music command the bot understands, with its parsed options
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MusicCommand {
    Play { query: String },
    Skip,
    QueueList,
    Stop,
    ClearQueue,
    Pause,
    Resume,
}

impl MusicCommand {
    /// Name the command is registered under
    pub fn name(&self) -> &'static str {
        match self {
            Self::Play { .. } => "play",
            Self::Skip => "skip",
            Self::QueueList => "queue-list",
            Self::Stop => "stop",
            Self::ClearQueue => "clear-queue",
            Self::Pause => "pause",
            Self::Resume => "resume",
        }
    }

    /// Whether the invoking member has to be in a voice channel.
    /// Listing the queue is the one command that works from anywhere.
    pub fn requires_voice_channel(&self) -> bool {
        match self {
            Self::QueueList => false,
            Self::Play { .. }
            | Self::Skip
            | Self::Stop
            | Self::ClearQueue
            | Self::Pause
            | Self::Resume => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(MusicCommand::Play { query: "a".into() }, "play" ; "play")]
    #[test_case(MusicCommand::Skip, "skip" ; "skip")]
    #[test_case(MusicCommand::QueueList, "queue-list" ; "queue_list")]
    #[test_case(MusicCommand::Stop, "stop" ; "stop")]
    #[test_case(MusicCommand::ClearQueue, "clear-queue" ; "clear_queue")]
    #[test_case(MusicCommand::Pause, "pause" ; "pause")]
    #[test_case(MusicCommand::Resume, "resume" ; "resume")]
    fn test_name(command: MusicCommand, expected: &str) {
        assert_eq!(command.name(), expected);
    }

    #[test]
    fn test_only_queue_list_skips_voice_check() {
        assert!(!MusicCommand::QueueList.requires_voice_channel());
        assert!(MusicCommand::Skip.requires_voice_channel());
        assert!(
            MusicCommand::Play {
                query: "a".into()
            }
            .requires_voice_channel()
        );
    }
}
