//! Pure rendering of a poll outcome into widget markup.
//!
//! Output depends only on the arguments, so identical inputs always produce
//! byte-identical markup.

mod markup;
mod theme;

pub use theme::Theme;

use markup::Markup;
use types::{PlayerEntry, PollResult, ServerStatus, WidgetConfig};

const OFFLINE_MESSAGE: &str = "Server offline or unreachable";
const LOADING_MESSAGE: &str = "Loading server data...";

/// One labelled value in the info list.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Row {
    field: &'static str,
    label: &'static str,
    value: String,
}

/// Render the outcome of one poll.
///
/// A failure always renders the same offline state for a given config; the
/// failure reason is never shown.
#[must_use]
pub fn render(result: &PollResult, config: &WidgetConfig) -> String {
    let theme = Theme::from(config);

    match result {
        PollResult::Success(status) => render_status(status, config, &theme),
        PollResult::Failure(_) => {
            render_notice(&theme, "sw-offline", OFFLINE_MESSAGE)
        }
    }
}

/// Placeholder shown before the first poll completes.
#[must_use]
pub fn render_loading(config: &WidgetConfig) -> String {
    render_notice(&Theme::from(config), "sw-loading", LOADING_MESSAGE)
}

fn render_notice(theme: &Theme<'_>, class: &str, message: &str) -> String {
    let mut markup = Markup::new();
    open_container(&mut markup, theme)
        .element("div", &[("class", class), ("role", "status")], message)
        .close("div");
    markup.finish()
}

fn open_container<'m>(
    markup: &'m mut Markup,
    theme: &Theme<'_>,
) -> &'m mut Markup {
    markup.open(
        "div",
        &[
            ("class", theme.container_class().as_str()),
            ("style", theme.container_style().as_str()),
        ],
    )
}

fn render_status(
    status: &ServerStatus,
    config: &WidgetConfig,
    theme: &Theme<'_>,
) -> String {
    let row_style = theme.row_style();
    let mut markup = Markup::new();
    open_container(&mut markup, theme);

    if let Some(hostname) =
        status.hostname.as_deref().filter(|h| !h.is_empty())
    {
        markup
            .open("div", &[("class", "sw-header")])
            .element(
                "h2",
                &[
                    ("class", "sw-title"),
                    ("data-field", "hostname"),
                    ("style", theme.title_style().as_str()),
                ],
                hostname,
            )
            .element(
                "div",
                &[("class", "sw-address")],
                &config.server_address(),
            )
            .element(
                "span",
                &[
                    ("class", "sw-badge"),
                    ("style", theme.badge_style().as_str()),
                ],
                "ONLINE",
            )
            .close("div");
    }

    markup.open("ul", &[("class", "sw-rows")]);
    for row in rows(status) {
        markup
            .open(
                "li",
                &[
                    ("class", "sw-row"),
                    ("data-field", row.field),
                    ("style", row_style.as_str()),
                ],
            )
            .element("span", &[("class", "sw-label")], row.label)
            .element("span", &[("class", "sw-value")], &row.value)
            .close("li");
    }
    markup.close("ul");

    if let Some(players) =
        status.player_list.as_deref().filter(|p| !p.is_empty())
    {
        markup
            .open(
                "div",
                &[("class", "sw-players"), ("data-field", "player_list")],
            )
            .element(
                "div",
                &[("class", "sw-label")],
                &format!("Active Players ({})", players.len()),
            )
            .open("ul", &[("class", "sw-player-list")]);
        for player in players {
            markup.element(
                "li",
                &[("class", "sw-player"), ("style", row_style.as_str())],
                &player_line(player),
            );
        }
        markup.close("ul").close("div");
    }

    markup
        .element(
            "div",
            &[("class", "sw-footer")],
            &format!("Auto-refresh: {}s", config.refresh_interval_seconds),
        )
        .close("div");

    markup.finish()
}

/// Rows for the present fields, in display order. Absent fields get no row.
fn rows(status: &ServerStatus) -> Vec<Row> {
    let mut rows = Vec::new();
    let mut push = |field, label, value: Option<String>| {
        if let Some(value) = value {
            rows.push(Row {
                field,
                label,
                value,
            });
        }
    };

    push("map", "Map", status.map.clone());
    push(
        "players",
        "Players",
        status.current_players.map(|current| match status.max_players {
            Some(max) => format!("{current}/{max}"),
            None => current.to_string(),
        }),
    );
    push("game", "Game", status.game.clone());
    push("ping", "Ping", status.ping.map(|ping| format!("{ping}ms")));
    push(
        "password_protected",
        "Password",
        status
            .password_protected
            .map(|locked| if locked { "Yes" } else { "No" }.to_string()),
    );
    push(
        "vac_enabled",
        "VAC",
        status
            .vac_enabled
            .map(|vac| if vac { "Enabled" } else { "Disabled" }.to_string()),
    );

    rows
}

fn player_line(player: &PlayerEntry) -> String {
    let mut line = player.name.clone();
    if let Some(score) = player.score {
        line.push_str(&format!(" - Score: {score}"));
    }
    if let Some(time) = player.time {
        #[allow(clippy::cast_possible_truncation)]
        let minutes = (time / 60.0).floor() as i64;
        line.push_str(&format!(" - Time: {minutes}m"));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate;
    use serde_json::json;
    use types::{FailureKind, ThemeKind};

    fn config() -> WidgetConfig {
        WidgetConfig {
            theme: ThemeKind::Neon,
            font_family: "Inter, sans-serif".to_string(),
            refresh_interval_seconds: 30,
            ..WidgetConfig::new("cfg-1", "192.0.2.10", 27015)
        }
    }

    fn success(status: ServerStatus) -> String {
        render(&PollResult::Success(status), &config())
    }

    fn field_rows(markup: &str) -> Vec<&str> {
        markup
            .split("data-field=\"")
            .skip(1)
            .filter_map(|rest| rest.split('"').next())
            .collect()
    }

    #[test]
    fn test_scenario_partial_status() {
        let result = validate(&json!({
            "success": true,
            "data": {
                "hostname": "Arena",
                "map": "de_dust2",
                "current_players": 12,
                "max_players": 16,
                "ping": 45.2
            }
        }));

        let markup = render(&result, &config());

        assert_eq!(
            field_rows(&markup),
            vec!["hostname", "map", "players", "ping"]
        );
        assert!(markup.contains(">Arena</h2>"));
        assert!(markup.contains("<span class=\"sw-value\">de_dust2</span>"));
        assert!(markup.contains("<span class=\"sw-value\">12/16</span>"));
        assert!(markup.contains("<span class=\"sw-value\">45.2ms</span>"));
        assert!(!markup.contains("Game"));
        assert!(!markup.contains(OFFLINE_MESSAGE));
    }

    #[test]
    fn test_scenario_application_failure() {
        let result = validate(&json!({"success": false, "error": "timeout"}));

        let markup = render(&result, &config());

        assert!(markup.contains(OFFLINE_MESSAGE));
        assert!(!markup.contains("timeout"));
        assert!(field_rows(&markup).is_empty());
    }

    #[test]
    fn test_failure_markup_ignores_reason() {
        let config = config();
        let canonical = render(
            &PollResult::failure(FailureKind::Network, "timeout"),
            &config,
        );

        for (kind, reason) in [
            (FailureKind::Network, "network error: connection refused"),
            (FailureKind::Protocol, "http-503"),
            (FailureKind::Protocol, "decode error: expected value"),
            (FailureKind::Application, "<script>alert(1)</script>"),
            (FailureKind::Application, ""),
        ] {
            assert_eq!(
                render(&PollResult::failure(kind, reason), &config),
                canonical
            );
        }
    }

    #[test]
    fn test_absent_fields_produce_no_rows() {
        let markup = success(ServerStatus::default());

        assert!(field_rows(&markup).is_empty());
        assert!(!markup.contains("sw-header"));
        assert!(!markup.contains("sw-players"));
        assert!(markup.contains("Auto-refresh: 30s"));
    }

    #[test]
    fn test_each_field_alone_renders_exactly_its_row() {
        let empty = ServerStatus::default;
        let cases = [
            (
                ServerStatus {
                    map: Some("de_nuke".into()),
                    ..empty()
                },
                "map",
            ),
            (
                ServerStatus {
                    current_players: Some(3),
                    ..empty()
                },
                "players",
            ),
            (
                ServerStatus {
                    game: Some("cstrike".into()),
                    ..empty()
                },
                "game",
            ),
            (
                ServerStatus {
                    ping: Some(12.0),
                    ..empty()
                },
                "ping",
            ),
            (
                ServerStatus {
                    password_protected: Some(true),
                    ..empty()
                },
                "password_protected",
            ),
            (
                ServerStatus {
                    vac_enabled: Some(false),
                    ..empty()
                },
                "vac_enabled",
            ),
        ];

        for (status, field) in cases {
            assert_eq!(field_rows(&success(status)), vec![field]);
        }
    }

    #[test]
    fn test_players_without_max() {
        let status = ServerStatus {
            current_players: Some(7),
            ..Default::default()
        };
        let markup = success(status);
        assert!(markup.contains("<span class=\"sw-value\">7</span>"));

        let status = ServerStatus {
            max_players: Some(16),
            ..Default::default()
        };
        let markup = success(status);
        assert!(field_rows(&markup).is_empty());
    }

    #[test]
    fn test_ping_is_not_rounded() {
        let status = ServerStatus {
            ping: Some(45.678_901),
            ..Default::default()
        };
        let markup = success(status);
        assert!(markup.contains(">45.678901ms<"));
    }

    #[test]
    fn test_boolean_rows() {
        let status = ServerStatus {
            password_protected: Some(false),
            vac_enabled: Some(true),
            ..Default::default()
        };
        let markup = success(status);
        assert!(markup.contains(
            "<span class=\"sw-label\">Password</span>\
             <span class=\"sw-value\">No</span>"
        ));
        assert!(markup.contains(
            "<span class=\"sw-label\">VAC</span>\
             <span class=\"sw-value\">Enabled</span>"
        ));
    }

    #[test]
    fn test_header_includes_server_address() {
        let status = ServerStatus {
            hostname: Some("Arena".into()),
            ..Default::default()
        };
        let markup = success(status);
        assert!(
            markup.contains("<div class=\"sw-address\">192.0.2.10:27015</div>")
        );
        assert!(markup.contains(">ONLINE</span>"));
    }

    #[test]
    fn test_empty_hostname_has_no_header() {
        let markup = success(ServerStatus {
            hostname: Some(String::new()),
            map: Some("de_dust2".into()),
            ..Default::default()
        });

        assert!(!markup.contains("sw-header"));
        assert!(!markup.contains("ONLINE"));
        assert_eq!(field_rows(&markup), vec!["map"]);
    }

    #[test]
    fn test_player_list() {
        let status = ServerStatus {
            player_list: Some(vec![
                PlayerEntry {
                    name: "alice".into(),
                    score: Some(10),
                    time: Some(125.5),
                },
                PlayerEntry {
                    name: "bob".into(),
                    score: None,
                    time: None,
                },
            ]),
            ..Default::default()
        };

        let markup = success(status);

        assert!(markup.contains("Active Players (2)"));
        assert!(markup.contains(">alice - Score: 10 - Time: 2m</li>"));
        assert!(markup.contains(">bob</li>"));
    }

    #[test]
    fn test_empty_player_list_is_omitted() {
        let status = ServerStatus {
            player_list: Some(Vec::new()),
            ..Default::default()
        };
        let markup = success(status);
        assert!(!markup.contains("sw-players"));
    }

    #[test]
    fn test_server_text_is_escaped() {
        let status = ServerStatus {
            hostname: Some("<img src=x onerror=alert(1)>".into()),
            map: Some("de_\"dust\"".into()),
            ..Default::default()
        };
        let markup = success(status);
        assert!(!markup.contains("<img"));
        assert!(markup.contains("&lt;img src=x onerror=alert(1)&gt;"));
        assert!(markup.contains("de_&quot;dust&quot;"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let result = PollResult::Success(ServerStatus {
            hostname: Some("Arena".into()),
            map: Some("de_dust2".into()),
            current_players: Some(12),
            max_players: Some(16),
            game: Some("cstrike".into()),
            ping: Some(45.2),
            ..Default::default()
        });
        let config = config();

        assert_eq!(render(&result, &config), render(&result, &config));
    }

    #[test]
    fn test_styling_does_not_change_rows() {
        let result = PollResult::Success(ServerStatus {
            hostname: Some("Arena".into()),
            map: Some("de_dust2".into()),
            ping: Some(9.5),
            ..Default::default()
        });
        let light = WidgetConfig {
            theme: ThemeKind::Minimal,
            accent_color: "#3366ff".into(),
            dark_mode: false,
            font_family: "monospace".into(),
            ..config()
        };

        let dark_markup = render(&result, &config());
        let light_markup = render(&result, &light);

        assert_ne!(dark_markup, light_markup);
        assert_eq!(field_rows(&dark_markup), field_rows(&light_markup));
        assert!(light_markup.contains("sw-theme-minimal sw-light"));
        assert!(light_markup.contains("#3366ff"));
    }

    #[test]
    fn test_container_style_fields_change_styling_only() {
        let result = PollResult::Success(ServerStatus {
            hostname: Some("Arena".into()),
            current_players: Some(3),
            vac_enabled: Some(true),
            ..Default::default()
        });
        let baseline = render(&result, &config());
        let variants = [
            (
                WidgetConfig {
                    background_color: Some("#202040".into()),
                    ..config()
                },
                "background: #202040;",
            ),
            (
                WidgetConfig {
                    text_color: Some("#fafafa".into()),
                    ..config()
                },
                "color: #fafafa;",
            ),
            (
                WidgetConfig {
                    border_radius: 4,
                    ..config()
                },
                "border-radius: 4px;",
            ),
            (
                WidgetConfig {
                    border_style: "dashed".into(),
                    ..config()
                },
                "border: 2px dashed #00ff88;",
            ),
            (
                WidgetConfig {
                    shadow_intensity: 100,
                    ..config()
                },
                "box-shadow: 0 0 40px #00ff8840;",
            ),
        ];

        for (styled, declaration) in variants {
            let markup = render(&result, &styled);
            assert_ne!(markup, baseline, "{declaration}");
            assert!(markup.contains(declaration), "{declaration}");
            assert_eq!(field_rows(&markup), field_rows(&baseline));
        }
    }

    #[test]
    fn test_loading_state() {
        let markup = render_loading(&config());
        assert!(markup.contains(LOADING_MESSAGE));
        assert!(markup.contains("sw-theme-neon"));
        let failure = PollResult::failure(FailureKind::Network, "timeout");
        assert_ne!(markup, render(&failure, &config()));
    }
}
