pub const PANEL_STYLES: &str = r#"
/* Base */
* {
    box-sizing: border-box;
}

body {
    margin: 0;
    background: var(--panel-bg, #f4f8fa);
    color: var(--text-primary, #1a2b3c);
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif;
    font-size: 14px;
}

.lexly-panel {
    min-height: 100vh;
    padding: 1.25rem 1rem;
}

/* Brand */
.brand {
    display: flex;
    align-items: center;
    gap: 0.625rem;
}

.brand-logo {
    width: 34px;
    height: 34px;
    display: flex;
    align-items: center;
    justify-content: center;
    border-radius: 10px;
    background: var(--accent, #0c9ea4);
    color: #ffffff;
    font-weight: 700;
}

.brand-name {
    font-size: 1.125rem;
    font-weight: 700;
}

/* Auth */
.auth {
    display: flex;
    flex-direction: column;
    gap: 0.75rem;
}

.auth-title {
    margin: 1rem 0 0;
    font-size: 1.375rem;
}

.auth-subtitle {
    margin: 0;
    color: var(--text-secondary, #7a8a99);
}

.tabs {
    display: flex;
    padding: 4px;
    border-radius: 10px;
    background: #e3ecf0;
}

.tab {
    flex: 1;
    padding: 0.5rem;
    border: none;
    border-radius: 8px;
    background: transparent;
    color: var(--text-secondary, #7a8a99);
    font: inherit;
    cursor: pointer;
}

.tab.active {
    background: #ffffff;
    color: var(--text-primary, #1a2b3c);
    font-weight: 600;
}

.form {
    display: flex;
    flex-direction: column;
    gap: 0.625rem;
}

.field,
.search {
    width: 100%;
    padding: 0.625rem 0.75rem;
    border: 1px solid #d3dfe5;
    border-radius: 10px;
    background: #ffffff;
    font: inherit;
    outline: none;
}

.field:focus,
.search:focus {
    border-color: var(--accent, #0c9ea4);
}

.form-error {
    color: var(--danger, #d9534f);
    font-size: 0.8125rem;
}

.btn-primary {
    padding: 0.625rem;
    border: none;
    border-radius: 10px;
    background: var(--accent, #0c9ea4);
    color: #ffffff;
    font: inherit;
    font-weight: 600;
    cursor: pointer;
}

.btn-primary:disabled {
    opacity: 0.6;
    cursor: default;
}

/* Dashboard */
.header {
    display: flex;
    align-items: center;
    justify-content: space-between;
    margin-bottom: 1rem;
}

.user-email {
    font-size: 0.75rem;
    color: var(--text-secondary, #7a8a99);
}

.btn-signout,
.btn-retry {
    padding: 0.375rem 0.75rem;
    border: 1px solid #d3dfe5;
    border-radius: 8px;
    background: #ffffff;
    font: inherit;
    font-size: 0.8125rem;
    cursor: pointer;
}

.stats {
    display: grid;
    grid-template-columns: 1fr 1fr;
    gap: 0.625rem;
    margin-bottom: 0.875rem;
}

.stat {
    display: flex;
    flex-direction: column;
    padding: 0.75rem;
    border-radius: 12px;
    background: #ffffff;
}

.stat-value {
    font-size: 1.375rem;
    font-weight: 700;
    color: var(--accent, #0c9ea4);
}

.stat-label {
    font-size: 0.75rem;
    color: var(--text-secondary, #7a8a99);
}

.list-header {
    display: flex;
    justify-content: space-between;
    margin: 1rem 0 0.5rem;
    font-weight: 600;
}

.list-count {
    font-weight: 400;
    color: var(--text-secondary, #7a8a99);
}

.list-status {
    display: flex;
    align-items: center;
    justify-content: center;
    gap: 0.5rem;
    padding: 2rem 0;
    color: var(--text-secondary, #7a8a99);
}

.list-status.error {
    flex-direction: column;
    color: var(--danger, #d9534f);
}

/* Empty state */
.empty {
    padding: 2.5rem 1rem;
    text-align: center;
}

.empty-icon {
    font-size: 2rem;
}

.empty-title {
    margin-top: 0.5rem;
    font-weight: 600;
}

.empty-hint {
    margin-top: 0.25rem;
    color: var(--text-secondary, #7a8a99);
    font-size: 0.8125rem;
}

/* Cards */
.word-list {
    display: flex;
    flex-direction: column;
    gap: 0.5rem;
}

.card {
    padding: 0.75rem 0.875rem;
    border-radius: 12px;
    background: #ffffff;
    box-shadow: 0 1px 3px rgba(12, 30, 50, 0.08);
    cursor: pointer;
    animation: card-in 0.25s ease both;
    transition: opacity 0.2s ease;
}

.card.deleting {
    opacity: 0.4;
    pointer-events: none;
}

.card-row {
    display: flex;
    align-items: center;
    justify-content: space-between;
}

.card-word {
    font-weight: 600;
}

.card-date {
    font-size: 0.75rem;
    color: var(--text-secondary, #7a8a99);
}

.card-actions {
    display: flex;
    align-items: center;
    gap: 0.25rem;
}

.btn-delete {
    border: none;
    background: transparent;
    color: var(--text-secondary, #7a8a99);
    cursor: pointer;
}

.btn-delete:hover {
    color: var(--danger, #d9534f);
}

.chevron {
    color: var(--text-secondary, #7a8a99);
    transition: transform 0.2s ease;
}

.card.open .chevron {
    transform: rotate(90deg);
}

.card-body {
    margin-top: 0.625rem;
    padding-top: 0.625rem;
    border-top: 1px solid #edf2f5;
}

.definition {
    margin: 0;
    line-height: 1.5;
}

.definition.loading {
    display: flex;
    align-items: center;
    gap: 0.5rem;
    color: var(--text-secondary, #7a8a99);
}

.definition.error {
    color: var(--danger, #d9534f);
}

/* Spinner */
.spinner {
    width: 18px;
    height: 18px;
    border: 2px solid rgba(12, 158, 164, 0.25);
    border-top-color: var(--accent, #0c9ea4);
    border-radius: 50%;
    animation: spin 0.7s linear infinite;
}

.spinner.small {
    width: 14px;
    height: 14px;
}

@keyframes spin {
    to { transform: rotate(360deg); }
}

@keyframes card-in {
    from { opacity: 0; transform: translateY(6px); }
    to { opacity: 1; transform: translateY(0); }
}
"#;
