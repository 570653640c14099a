//! The conversation every fresh screen starts with.

use super::message::{ChatMessage, Participant};

/// Number of records in the seed conversation.
pub const SEED_LEN: usize = 6;

/// Build the six seed records in display order.
///
/// The last record carries a fenced Swift snippet.
pub fn seed_messages() -> Vec<ChatMessage> {
    vec![
        ChatMessage::incoming(
            "大家好！欢迎来到GitHub风格聊天界面。这个界面支持浅色和深色主题切换，并且没有侧边栏。",
            "14:32",
        ),
        ChatMessage::outgoing(
            "这个设计看起来很棒！主题切换功能非常流畅，而且没有侧边栏让聊天区域更宽敞了。",
            "14:35",
        ),
        ChatMessage::incoming(
            "是的，这样布局更简洁，专注于聊天内容。我使用了CSS变量来实现主题切换，这样可以在浅色和深色主题之间平滑过渡。",
            "14:36",
        ),
        ChatMessage::incoming(
            "深色主题对夜间使用非常友好，而且符合GitHub的整体设计风格。简洁的布局让聊天体验更好了。",
            "14:38",
        ),
        ChatMessage::outgoing(
            "我注意到消息气泡的颜色也会根据主题变化，这个细节做得很好！没有侧边栏的设计让界面更加简洁现代。",
            "14:40",
        ),
        ChatMessage::new(
            Participant::REMOTE,
            "我们还可以添加一些代码片段功能，就像GitHub那样：\n```swift\nfunc greetUser(username: String) {\n    print(\"Hello, \\(username)! Welcome to GitHub Chat.\")\n}\n```",
            "14:42",
            false,
            true,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::message::MessageBody;

    #[test]
    fn test_seed_order_and_flags() {
        let seed = seed_messages();
        assert_eq!(seed.len(), SEED_LEN);

        let times: Vec<&str> = seed.iter().map(ChatMessage::time).collect();
        assert_eq!(times, ["14:32", "14:35", "14:36", "14:38", "14:40", "14:42"]);

        let sent: Vec<bool> = seed.iter().map(ChatMessage::is_sent).collect();
        assert_eq!(sent, [false, true, false, false, true, false]);

        let flagged: Vec<bool> = seed.iter().map(ChatMessage::has_code_block).collect();
        assert_eq!(flagged, [false, false, false, false, false, true]);
    }

    #[test]
    fn test_seed_senders() {
        let seed = seed_messages();
        let senders: Vec<&str> = seed.iter().map(ChatMessage::sender).collect();
        assert_eq!(
            senders,
            ["octocat", "youki", "octocat", "octocat", "youki", "octocat"]
        );
        let avatars: Vec<&str> = seed.iter().map(ChatMessage::avatar).collect();
        assert_eq!(avatars, ["octocat", "YK", "octocat", "octocat", "YK", "octocat"]);
    }

    #[test]
    fn test_seed_contents() {
        let seed = seed_messages();
        let contents: Vec<&str> = seed.iter().map(ChatMessage::content).collect();
        assert_eq!(
            contents,
            [
                "大家好！欢迎来到GitHub风格聊天界面。这个界面支持浅色和深色主题切换，并且没有侧边栏。",
                "这个设计看起来很棒！主题切换功能非常流畅，而且没有侧边栏让聊天区域更宽敞了。",
                "是的，这样布局更简洁，专注于聊天内容。我使用了CSS变量来实现主题切换，这样可以在浅色和深色主题之间平滑过渡。",
                "深色主题对夜间使用非常友好，而且符合GitHub的整体设计风格。简洁的布局让聊天体验更好了。",
                "我注意到消息气泡的颜色也会根据主题变化，这个细节做得很好！没有侧边栏的设计让界面更加简洁现代。",
                "我们还可以添加一些代码片段功能，就像GitHub那样：\n```swift\nfunc greetUser(username: String) {\n    print(\"Hello, \\(username)! Welcome to GitHub Chat.\")\n}\n```",
            ]
        );
    }

    #[test]
    fn test_seed_snippet_extracts() {
        let seed = seed_messages();
        let MessageBody::WithCode(snippet) = seed[5].body() else {
            panic!("last seed message should carry a snippet");
        };
        assert_eq!(snippet.prose, "我们还可以添加一些代码片段功能，就像GitHub那样：\n");
        assert_eq!(snippet.language(), Some("swift"));
        assert!(snippet.body().starts_with("func greetUser(username: String) {"));
        assert!(snippet.body().contains(r#"print("Hello, \(username)! Welcome to GitHub Chat.")"#));
        assert!(snippet.body().ends_with('}'));
    }
}
