//! Landing page with the camera widget.
//!
//! The widget grabs one frame from the browser camera into a canvas, posts it as JPEG to
//! `/classify` and renders the answer. A busy indicator is shown while the request runs.

use crate::presentation::{PRESENTATION_CAPTION, PRESENTATION_WIDTH};

const STYLE: &str = r#"
<style>
  :root { --bg:#0b1220; --panel:#0f182b; --text:#e6f7ff; --muted:#9fb3c8; --accent:#00e5ff; --accent2:#00ffa3; }
  body { margin:0; background: radial-gradient(1000px 600px at 10% 0%, #0f1a30 0%, var(--bg) 60%); color:var(--text); font-family:"Inter",sans-serif; }
  .layout { display:flex; min-height:100vh; }
  aside { width:260px; padding:1.5rem; background:linear-gradient(180deg, #0e1628 0%, #0b1220 100%); border-right:1px solid rgba(0,229,255,.15); color:var(--muted); }
  main { flex:1; max-width:760px; margin:0 auto; padding:2rem; }
  h1, h2, h3 { color:var(--accent); font-family:"JetBrains Mono",monospace; }
  .caption { color:var(--muted); font-size:.85rem; }
  .banner { padding:.6rem 1rem; border-radius:10px; background:rgba(0,255,163,.12); border:1px solid rgba(0,255,163,.4); }
  button { background:linear-gradient(90deg, var(--accent) 0%, var(--accent2) 100%); color:#00121a; border:none; border-radius:10px; font-weight:700; padding:.5rem 1rem; cursor:pointer; box-shadow:0 0 12px rgba(0,229,255,.5); }
  button:disabled { opacity:.5; cursor:wait; }
  video, canvas { width:100%; border-radius:10px; background:var(--panel); }
  #busy { display:none; color:var(--accent); }
  #result { margin-top:1rem; padding:1rem; border-radius:10px; background:var(--panel); white-space:pre-wrap; font-family:"JetBrains Mono",monospace; }
</style>
"#;

const SCRIPT: &str = r#"
<script>
  const video = document.getElementById('camera');
  const canvas = document.getElementById('snapshot');
  const shoot = document.getElementById('shoot');
  const clear = document.getElementById('clear');
  const busy = document.getElementById('busy');
  const result = document.getElementById('result');

  navigator.mediaDevices.getUserMedia({ video: true })
    .then((stream) => { video.srcObject = stream; })
    .catch((err) => { result.textContent = 'Camera unavailable: ' + err; });

  function render(answer) {
    switch (answer.status) {
      case 'no_capture':
        return 'Take a photo to classify it.';
      case 'classified':
        return 'Probabilities: [' + answer.probabilities.map((p) => p.toFixed(4)).join(', ') + ']\n'
          + (answer.outcome.kind === 'confident' ? 'Result: ' : '') + answer.summary;
      default:
        return 'Error: ' + answer.error;
    }
  }

  async function classify(blob) {
    const form = new FormData();
    if (blob) { form.append('image', blob, 'snapshot.jpg'); }
    shoot.disabled = true;
    busy.style.display = 'block';
    try {
      const response = await fetch('/classify', { method: 'POST', body: form });
      result.textContent = render(await response.json());
    } catch (err) {
      result.textContent = 'Error: ' + err;
    } finally {
      busy.style.display = 'none';
      shoot.disabled = false;
    }
  }

  shoot.addEventListener('click', () => {
    canvas.width = video.videoWidth;
    canvas.height = video.videoHeight;
    canvas.getContext('2d').drawImage(video, 0, 0);
    canvas.style.display = 'block';
    canvas.toBlob(classify, 'image/jpeg', 0.95);
  });

  clear.addEventListener('click', () => {
    canvas.style.display = 'none';
    classify(null);
  });
</script>
"#;

/// Render the landing page.
pub fn render_index(version: &str, has_presentation: bool) -> String {
    let presentation = match has_presentation {
        true => format!(
            r#"<figure><img src="/presentation.jpg" width="{PRESENTATION_WIDTH}" alt="{PRESENTATION_CAPTION}"><figcaption class="caption">{PRESENTATION_CAPTION}</figcaption></figure>"#
        ),
        false => String::new(),
    };

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <title>Image Recognition</title>
  {STYLE}
</head>
<body>
<div class="layout">
  <aside>
    <h3>About</h3>
    <p>A model trained with Teachable Machine runs on every photo you take.</p>
    <p>The photo is resized to 224x224, normalized and classified once. A class is reported when its probability exceeds 0.5.</p>
  </aside>
  <main>
    <p class="caption">classify_server v{version}</p>
    <h1>Image Recognition</h1>
    <p>Computer vision based on a Keras model trained with Teachable Machine. Take a photo with your camera to classify it.</p>
    <p class="banner">Model loaded.</p>
    {presentation}
    <video id="camera" autoplay playsinline></video>
    <p><button id="shoot">Take photo</button> <button id="clear">Clear photo</button></p>
    <canvas id="snapshot" style="display:none"></canvas>
    <p id="busy">Classifying...</p>
    <div id="result">Take a photo to classify it.</div>
  </main>
</div>
{SCRIPT}
</body>
</html>
"#
    )
}

#[cfg(test)]
mod tests {
    use super::render_index;

    #[test]
    fn presentation_is_optional() {
        let with = render_index("0.1.0", true);
        let without = render_index("0.1.0", false);

        assert!(with.contains(r#"src="/presentation.jpg""#));
        assert!(!without.contains("/presentation.jpg"));
        assert!(without.contains("classify_server v0.1.0"));
        assert!(without.contains("fetch('/classify'"));
    }
}
