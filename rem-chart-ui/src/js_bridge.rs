//! Typed wrappers around JS interop via `js_sys::eval()`.
//!
//! ECharts is loaded from a `<script>` tag at runtime; the bridge script
//! keeps a per-container instance registry on `window` so charts are
//! created once and updated in place. This module evaluates the bridge and
//! exposes safe Rust wrappers that serialize option objects and call the
//! registry functions.

// Embed the bridge JS at compile time
static BRIDGE_JS: &str = include_str!("../assets/js/echarts-bridge.js");

/// Execute arbitrary JS, wrapping in try/catch to avoid panics.
pub fn call_js(code: &str) {
    let wrapped = format!(
        "try {{ {} }} catch(e) {{ console.warn('REM JS call failed:', e); }}",
        code
    );
    let _ = js_sys::eval(&wrapped);
}

/// Load the bridge with a wait-for-ECharts polling loop. Call once at app
/// startup; re-evaluation is harmless (the resize bind is flag-guarded).
pub fn init_charts() {
    let store_js = format!(
        "window.__remBridgeScript = {};",
        serde_json::to_string(BRIDGE_JS).unwrap_or_default()
    );
    let _ = js_sys::eval(&store_js);

    let init_js = r#"
        (function() {
            var waitForECharts = setInterval(function() {
                if (typeof echarts !== 'undefined') {
                    clearInterval(waitForECharts);
                    // Eval at global scope via indirect eval
                    (0, eval)(window.__remBridgeScript);
                    delete window.__remBridgeScript;
                    console.log('REM chart bridge initialized');
                }
            }, 100);
        })();
    "#;
    let _ = js_sys::eval(init_js);
}

fn escape(json: &str) -> String {
    json.replace('\\', "\\\\").replace('\'', "\\'").replace('\n', "")
}

/// Bind an option to the chart living in `container_id`, creating the
/// instance on first use and replacing the option wholesale afterwards.
///
/// Polls until the bridge is ready and the container exists in the DOM.
pub fn bind_chart(container_id: &str, option_json: &str) {
    let escaped = escape(option_json);
    call_js(&format!(
        r#"
        (function() {{
            var poll = setInterval(function() {{
                if (window.__remChartsReady &&
                    document.getElementById('{container_id}')) {{
                    clearInterval(poll);
                    try {{
                        window.remBindChart('{container_id}', '{escaped}');
                    }} catch(e) {{ console.error('[REM] remBindChart error:', e); }}
                }}
            }}, 100);
        }})();
        "#,
    ));
}

/// Bind a geographic option, falling back to `fallback_json` when the
/// named boundary map is not registered. The fallback is silent beyond a
/// console diagnostic.
pub fn bind_geo_chart(container_id: &str, map_name: &str, option_json: &str, fallback_json: &str) {
    let escaped_option = escape(option_json);
    let escaped_fallback = escape(fallback_json);
    call_js(&format!(
        r#"
        (function() {{
            var poll = setInterval(function() {{
                if (window.__remChartsReady &&
                    document.getElementById('{container_id}')) {{
                    clearInterval(poll);
                    try {{
                        window.remBindGeoChart('{container_id}', '{map_name}', '{escaped_option}', '{escaped_fallback}');
                    }} catch(e) {{ console.error('[REM] remBindGeoChart error:', e); }}
                }}
            }}, 100);
        }})();
        "#,
    ));
}

/// Dispose the instance in `container_id`. Only needed when a container
/// switches between fundamentally different visual representations.
pub fn dispose_chart(container_id: &str) {
    call_js(&format!(
        "if (window.remDisposeChart) window.remDisposeChart('{container_id}');"
    ));
}
