//! Landing page served at `/`.
//!
//! The page is a static shell: a game canvas, a score display and a music
//! toggle. Its script and media live under `/static` and are served from the
//! configured static directory.

/// Base path for static assets.
pub const STATIC_PREFIX: &str = "/static";

/// Generate the landing page HTML.
///
/// `version` is shown in the footer.
pub fn generate_landing_html(version: &str) -> String {
    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Movieboard</title>
    <style>
        body {{
            margin: 0;
            background: #1b1d2a;
            color: #f2f2f2;
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            display: flex;
            flex-direction: column;
            align-items: center;
        }}
        header {{
            display: flex;
            gap: 24px;
            align-items: center;
            padding: 12px 0;
        }}
        #game {{
            width: 100vw;
            max-width: 1024px;
            height: 480px;
            background: #87ceeb;
            image-rendering: pixelated;
        }}
        #musicControl {{
            cursor: pointer;
            user-select: none;
        }}
        footer {{
            font-size: 12px;
            opacity: 0.6;
            padding: 8px 0;
        }}
    </style>
</head>
<body>
    <header>
        <span>Score: <span id="score">0</span></span>
        <span id="musicControl">🔇 Music: loading...</span>
    </header>
    <canvas id="game"></canvas>
    <footer>movieboard v{version} &middot; <a href="/api/status" style="color: inherit">status</a></footer>
    <script>
        window.ASSET_PATHS = {{
            music: "{prefix}/audio/background.mp3",
            bg: "{prefix}/images/background.png",
            ground: "{prefix}/images/ground.png",
            coin: "{prefix}/images/coin.png",
            idle: "{prefix}/images/idle.png",
            walk: "{prefix}/images/walk.png",
            run: "{prefix}/images/run.png",
            jump: "{prefix}/images/jump.png"
        }};
    </script>
    <script src="{prefix}/game.js"></script>
</body>
</html>"##,
        version = version,
        prefix = STATIC_PREFIX,
    )
}
