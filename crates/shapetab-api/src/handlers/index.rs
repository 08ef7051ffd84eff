use axum::response::Html;

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Shapefile Processor</title>
  <style>
    body { font-family: sans-serif; margin: 2rem; max-width: 40rem; }
    #status { margin-top: 1rem; color: #555; }
    #status.error { color: #b00020; }
  </style>
</head>
<body>
  <h2>Shapefile Processor</h2>
  <form id="convert">
    <label for="archive">Upload archive with shape files</label><br>
    <input type="file" id="archive" name="archive" accept=".zip" required>
    <br><br>
    <button type="submit">Download Processed Excel File</button>
  </form>
  <p id="status"></p>
  <script>
    const form = document.getElementById("convert");
    const status = document.getElementById("status");
    form.addEventListener("submit", async (event) => {
      event.preventDefault();
      status.className = "";
      status.textContent = "Converting...";
      const response = await fetch("/api/v1/convert", { method: "POST", body: new FormData(form) });
      const body = await response.json();
      if (!response.ok) {
        status.className = "error";
        status.textContent = body.details ? body.error + ": " + body.details : body.error;
        return;
      }
      status.textContent = body.message;
      window.location.href = body.download_url;
    });
  </script>
</body>
</html>
"#;

/// Upload page
pub async fn index_page() -> Html<&'static str> {
    Html(INDEX_HTML)
}
