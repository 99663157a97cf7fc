pub const STYLE_ELEMENT_ID: &str = "lexly-bubble-styles";

pub const BUBBLE_STYLES: &str = r#"
.lexly-bubble {
    position: absolute;
    z-index: 2147483647;
    transform: translate(-50%, 6px);
    opacity: 0;
    pointer-events: none;
    transition: opacity 0.2s ease, transform 0.2s ease;
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif;
    font-size: 13px;
    line-height: 1.4;
}

.lexly-bubble.lexly-visible {
    opacity: 1;
    transform: translate(-50%, 0);
    pointer-events: auto;
}

.lexly-bubble-inner {
    display: flex;
    align-items: center;
    gap: 10px;
    padding: 8px 10px;
    min-width: 220px;
    background: #ffffff;
    color: #1a2b3c;
    border-radius: 12px;
    box-shadow: 0 8px 28px rgba(12, 30, 50, 0.18);
}

.lexly-icon {
    width: 28px;
    height: 28px;
    display: flex;
    align-items: center;
    justify-content: center;
    border-radius: 8px;
    background: #0c9ea4;
    color: #ffffff;
    font-weight: 700;
    flex-shrink: 0;
}

.lexly-content {
    flex: 1;
    min-width: 0;
}

.lexly-word-label em,
.lexly-toast-text .lexly-word {
    font-style: normal;
    font-weight: 600;
    color: #0c9ea4;
}

.lexly-sub {
    font-size: 11px;
    color: #7a8a99;
}

.lexly-actions {
    display: flex;
    gap: 4px;
}

.lexly-btn-save,
.lexly-btn-close {
    border: none;
    border-radius: 8px;
    cursor: pointer;
    font: inherit;
}

.lexly-btn-save {
    padding: 5px 12px;
    background: #0c9ea4;
    color: #ffffff;
    font-weight: 600;
}

.lexly-btn-close {
    padding: 5px 8px;
    background: transparent;
    color: #7a8a99;
}

.lexly-toast {
    display: flex;
    align-items: center;
    gap: 8px;
}

.lexly-toast-text.lexly-info {
    color: #0c9ea4;
}

.lexly-toast-text.lexly-error {
    color: #f08080;
}

.lexly-spinner {
    width: 14px;
    height: 14px;
    border: 2px solid rgba(12, 158, 164, 0.25);
    border-top-color: #0c9ea4;
    border-radius: 50%;
    animation: lexly-spin 0.7s linear infinite;
}

@keyframes lexly-spin {
    to { transform: rotate(360deg); }
}
"#;
