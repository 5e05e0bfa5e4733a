//! The HTML pages

/// Browser tab title
pub const TITLE: &str = "The Gemini AI Chatbot";
/// Heading at the top of the page
pub const HEADING: &str = "🤖 Your Gemini Chatbot";

/// The chat page. It talks to the JSON/SSE API and renders text only
/// through `textContent`.
pub fn chat_page(model: &str) -> String {
    CHAT_PAGE
        .replace("{{TITLE}}", TITLE)
        .replace("{{HEADING}}", HEADING)
        .replace("{{MODEL}}", &escape_html(model))
}

/// The blocking page served when no credential was found. It has no input.
pub fn error_page(message: &str) -> String {
    ERROR_PAGE
        .replace("{{TITLE}}", TITLE)
        .replace("{{HEADING}}", HEADING)
        .replace("{{MESSAGE}}", &escape_html(message))
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

const STYLE: &str = r#"
  body { font-family: system-ui, sans-serif; margin: 0; background: #fafafa; color: #222; }
  main { max-width: 46rem; margin: 0 auto; min-height: 100vh; display: flex; flex-direction: column; }
  header { display: flex; align-items: baseline; justify-content: space-between; padding: 1rem; }
  h1 { font-size: 1.5rem; margin: 0; }
  .model { color: #777; font-size: .85rem; }
  #history { flex: 1; overflow-y: auto; padding: 0 1rem; }
  .turn { display: flex; gap: .75rem; margin: .75rem 0; }
  .avatar { flex: none; width: 2rem; height: 2rem; border-radius: 50%; display: grid; place-items: center; font-size: .8rem; color: #fff; }
  .user .avatar { background: #ff6b4a; }
  .assistant .avatar { background: #f0b400; }
  .text { white-space: pre-wrap; line-height: 1.5; padding-top: .25rem; }
  .error { background: #fdecea; color: #8a1c13; border-radius: .5rem; padding: .75rem 1rem; margin: .75rem 0; }
  form { position: sticky; bottom: 0; display: flex; gap: .5rem; padding: 1rem; background: #fafafa; }
  input { flex: 1; font: inherit; padding: .75rem; border: 1px solid #ccc; border-radius: .5rem; }
  button { font: inherit; padding: 0 1rem; border: 1px solid #ccc; border-radius: .5rem; background: #fff; cursor: pointer; }
"#;

const CHAT_PAGE_TEMPLATE: &str = r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{{TITLE}}</title>
<style>{{STYLE}}</style>
</head>
<body>
<main>
  <header>
    <h1>{{HEADING}}</h1>
    <span class="model">{{MODEL}} &middot; <button id="clear" type="button">Clear chat</button></span>
  </header>
  <section id="history" aria-live="polite"></section>
  <form id="prompt">
    <input id="input" autocomplete="off" placeholder="Ask Gemini a question..." autofocus>
    <button type="submit">Send</button>
  </form>
</main>
<script>
const KEY = "parley.session";
const transcript = document.getElementById("history");
const form = document.getElementById("prompt");
const input = document.getElementById("input");
let sessionId = sessionStorage.getItem(KEY);

function addTurn(role) {
  const turn = document.createElement("div");
  turn.className = "turn " + role;
  const avatar = document.createElement("div");
  avatar.className = "avatar";
  avatar.textContent = role === "user" ? "You" : "AI";
  const text = document.createElement("div");
  text.className = "text";
  turn.append(avatar, text);
  transcript.append(turn);
  return text;
}

function addError(message) {
  const box = document.createElement("div");
  box.className = "error";
  box.textContent = message;
  transcript.append(box);
}

function scrollDown() {
  transcript.scrollTop = transcript.scrollHeight;
  window.scrollTo(0, document.body.scrollHeight);
}

async function openSession() {
  const res = await fetch("/api/sessions", { method: "POST" });
  if (!res.ok) throw new Error("could not open a session (" + res.status + ")");
  sessionId = (await res.json()).id;
  sessionStorage.setItem(KEY, sessionId);
}

async function load() {
  if (sessionId) {
    const res = await fetch("/api/sessions/" + sessionId + "/history");
    if (res.ok) {
      transcript.replaceChildren();
      for (const turn of await res.json()) addTurn(turn.role).textContent = turn.text;
      scrollDown();
      return;
    }
  }
  await openSession();
  transcript.replaceChildren();
}

function handle(event, state) {
  switch (event.type) {
    case "user_turn":
      addTurn("user").textContent = event.text;
      state.reply = addTurn("assistant");
      break;
    case "assistant_chunk":
      state.text += event.text;
      state.reply.textContent = state.text;
      break;
    case "assistant_done":
      state.reply.textContent = event.text;
      break;
    case "turn_error":
      if (!event.partial && state.reply) state.reply.parentElement.remove();
      addError(event.message);
      break;
  }
  scrollDown();
}

async function submit(text) {
  const res = await fetch("/api/sessions/" + sessionId + "/messages", {
    method: "POST",
    headers: { "content-type": "application/json" },
    body: JSON.stringify({ text }),
  });
  if (res.status === 204) return;
  if (res.status === 404) {
    await load();
    addError("This conversation expired after a long idle period. A new one was started.");
    return;
  }
  if (!res.ok) {
    const body = await res.json().catch(() => ({}));
    addError(body.error || "request failed (" + res.status + ")");
    return;
  }

  const reader = res.body.getReader();
  const decoder = new TextDecoder();
  const state = { reply: null, text: "" };
  let buffer = "";
  for (;;) {
    const { value, done } = await reader.read();
    if (done) break;
    buffer += decoder.decode(value, { stream: true });
    let end;
    while ((end = buffer.indexOf("\n\n")) >= 0) {
      const frame = buffer.slice(0, end);
      buffer = buffer.slice(end + 2);
      for (const line of frame.split("\n")) {
        if (line.startsWith("data: ")) handle(JSON.parse(line.slice(6)), state);
      }
    }
  }
}

form.addEventListener("submit", async (e) => {
  e.preventDefault();
  const text = input.value;
  if (!text.trim()) return;
  input.value = "";
  input.disabled = true;
  try {
    await submit(text);
  } catch (err) {
    addError(String(err));
  } finally {
    input.disabled = false;
    input.focus();
  }
});

document.getElementById("clear").addEventListener("click", async () => {
  if (sessionId) await fetch("/api/sessions/" + sessionId, { method: "DELETE" });
  sessionStorage.removeItem(KEY);
  sessionId = null;
  await load();
});

load().catch((err) => addError(String(err)));
</script>
</body>
</html>
"#;

const ERROR_PAGE_TEMPLATE: &str = r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{{TITLE}}</title>
<style>{{STYLE}}</style>
</head>
<body>
<main>
  <header><h1>{{HEADING}}</h1></header>
  <div class="error" role="alert">{{MESSAGE}}</div>
</main>
</body>
</html>
"#;

static CHAT_PAGE: std::sync::LazyLock<String> =
    std::sync::LazyLock::new(|| CHAT_PAGE_TEMPLATE.replace("{{STYLE}}", STYLE));
static ERROR_PAGE: std::sync::LazyLock<String> =
    std::sync::LazyLock::new(|| ERROR_PAGE_TEMPLATE.replace("{{STYLE}}", STYLE));
